// src/domain/logic.rs

use chrono::Utc;
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Maximum Allowable Offer: the ceiling a buyer can pay while keeping the
/// configured margin. Never negative.
pub fn compute_mao(arv: f64, repairs: f64, percent: f64, fee: f64) -> f64 {
    (arv * percent - repairs - fee).max(0.0)
}

pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    n.min(max).max(min)
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Client-side record id: base-36 millisecond clock followed by five random
/// base-36 characters.
pub fn new_record_id() -> String {
    new_record_id_at(now_millis())
}

pub fn new_record_id_at(millis: i64) -> String {
    let mut rng = rand::thread_rng();
    let mut id = to_base36(millis.max(0) as u64);
    for _ in 0..5 {
        id.push(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char);
    }
    id
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ID_ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Rounded, thousands-grouped whole number: `1234567.6` -> `1,234,568`.
pub fn group_thousands(n: f64) -> String {
    let rounded = if n.is_finite() { n.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

pub fn money(n: f64) -> String {
    format!("${}", group_thousands(n))
}
