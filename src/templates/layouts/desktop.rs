use maud::{html, Markup, PreEscaped, DOCTYPE};

const NAV: [(&str, &str); 8] = [
    ("/", "Dashboard"),
    ("/leads", "Leads"),
    ("/pipeline", "Pipeline"),
    ("/buyers", "Buyers"),
    ("/calculator", "Calculator"),
    ("/market", "Market Intel"),
    ("/settings", "Settings"),
    ("/compose", "Compose"),
];

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f8fafc; }
header { display: flex; align-items: center; gap: 2rem; padding: .75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
header h3 { margin: 0; color: #524ed2; }
nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
nav a { text-decoration: none; color: #374151; }
nav a.active { color: #524ed2; font-weight: 600; }
main.container { max-width: 1100px; margin: 1.5rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.06); }
.notice { background: #eef2ff; border-left: 4px solid #524ed2; padding: .5rem 1rem; margin-bottom: 1rem; }
.notice.error { background: #fef2f2; border-color: #dc2626; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: .35rem .5rem; border-bottom: 1px solid #e5e7eb; }
form.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: .5rem; }
.board { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: .75rem; }
.inline { display: inline; }
pre { white-space: pre-wrap; background: #f3f4f6; padding: .75rem; border-radius: 6px; }
"#;

pub fn desktop_layout(title: &str, active: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Deal Sheet" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Deal Sheet" }
                    nav {
                        ul {
                            @for (href, label) in NAV {
                                li { a href=(href) class=[(href == active).then_some("active")] { (label) } }
                            }
                        }
                    }
                }
                main class="container" {
                    (content)
                }
            }
        }
    }
}
