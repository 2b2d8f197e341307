mod buyers_tests;
mod dashboard_tests;
mod leads_tests;
mod pipeline_tests;
mod settings_tests;
