// src/dashboard/metrics.rs
//
// Pure derivations over the loaded lists. Recomputed on demand; the lists
// never change between fetches so nothing here caches.

use crate::api::Job;

/// Confidence figure shown next to a prediction. The model does not report
/// one; this is the placeholder the product ships with.
pub const CONFIDENCE_PCT: u32 = 87;

/// Mean of the parseable salary estimates, rounded. Entries that do not
/// start with a number count as 0; an empty list yields 0.
pub fn average_salary(jobs: &[Job]) -> i64 {
    if jobs.is_empty() {
        return 0;
    }
    let total: f64 = jobs
        .iter()
        .map(|job| {
            job.salary_estimate
                .as_deref()
                .and_then(leading_number)
                .unwrap_or(0.0)
        })
        .sum();
    (total / jobs.len() as f64).round() as i64
}

/// The skill list is served ranked, so the first entry is the top skill.
pub fn top_skill(skills: &[String]) -> &str {
    skills.first().map(String::as_str).unwrap_or("N/A")
}

/// Badge set for a job row: at most the first three skills.
pub fn skill_badges(job: &Job) -> &[String] {
    let end = job.skills.len().min(3);
    &job.skills[..end]
}

/// Display range around a predicted salary, ±15% rounded. Placeholder
/// presentation values, same caveat as `CONFIDENCE_PCT`.
pub fn salary_range(salary: f64) -> (i64, i64) {
    ((salary * 0.85).round() as i64, (salary * 1.15).round() as i64)
}

/// Leading-number parse with the same tolerance as JavaScript's parseFloat:
/// "100" and "100k" both read as 100, "bad" reads as nothing.
fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut len = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        len = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    trimmed[..len].parse().ok()
}
