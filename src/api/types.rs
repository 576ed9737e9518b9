// src/api/types.rs
use serde::{Deserialize, Serialize};

/// `skills_extracted` arrives either as a proper JSON array or as a
/// JSON-encoded string of one, depending on which pipeline wrote the row.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsField {
    List(Vec<String>),
    Text(String),
}

/// `salary_estimate` is served as a bare number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SalaryField {
    Number(f64),
    Text(String),
}

/// Raw job row as served by `/debug/jobs` and `/jobs_by_skill/{skill}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub job_title: Option<String>,
    pub role: Option<String>,
    pub skills_extracted: Option<SkillsField>,
    pub salary_estimate: Option<SalaryField>,
}

/// Canonical job snapshot used everywhere past the API boundary. Read-only
/// once built; the duck-typed wire fields never leak out of `normalize`.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    pub title: Option<String>,
    pub role: Option<String>,
    pub skills: Vec<String>,
    pub salary_estimate: Option<String>,
}

impl JobRecord {
    /// The single normalization point for the dynamic wire shapes. A string
    /// `skills_extracted` that fails to JSON-decode yields no skills rather
    /// than an error, matching how the rows are rendered.
    pub fn normalize(self) -> Job {
        let skills = match self.skills_extracted {
            Some(SkillsField::List(items)) => items,
            Some(SkillsField::Text(raw)) => {
                serde_json::from_str::<Vec<String>>(&raw).unwrap_or_default()
            }
            None => Vec::new(),
        };

        let salary_estimate = self.salary_estimate.map(|salary| match salary {
            SalaryField::Text(text) => text,
            SalaryField::Number(number) => {
                if number.fract() == 0.0 {
                    format!("{}", number as i64)
                } else {
                    format!("{}", number)
                }
            }
        });

        Job {
            id: self.id,
            title: self.job_title,
            role: self.role,
            skills,
            salary_estimate,
        }
    }
}

impl Job {
    /// Display title, falling back from title to role to a placeholder.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.role.as_deref())
            .unwrap_or("Poste inconnu")
    }
}

/// Salary prediction form. Field casing follows the model's feature names,
/// so the serialized names are part of the wire contract.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictForm {
    #[serde(rename = "JobDescription")]
    pub job_description: String,
    pub location: String,
    pub role: String,
    pub ownership_category: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Sector")]
    pub sector: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub salary: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> JobRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_skills_as_encoded_string() {
        let job = record(r#"{"id": 1, "skills_extracted": "[\"A\",\"B\",\"C\",\"D\"]"}"#)
            .normalize();
        assert_eq!(job.skills, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_skills_as_array() {
        let job = record(r#"{"id": 2, "skills_extracted": ["Python", "SQL"]}"#).normalize();
        assert_eq!(job.skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_unparseable_skills_become_empty() {
        let job = record(r#"{"id": 3, "skills_extracted": "not json"}"#).normalize();
        assert!(job.skills.is_empty());

        let job = record(r#"{"id": 4}"#).normalize();
        assert!(job.skills.is_empty());
    }

    #[test]
    fn test_salary_number_and_string() {
        let job = record(r#"{"id": 5, "salary_estimate": 120}"#).normalize();
        assert_eq!(job.salary_estimate.as_deref(), Some("120"));

        let job = record(r#"{"id": 6, "salary_estimate": 120.5}"#).normalize();
        assert_eq!(job.salary_estimate.as_deref(), Some("120.5"));

        let job = record(r#"{"id": 7, "salary_estimate": "95"}"#).normalize();
        assert_eq!(job.salary_estimate.as_deref(), Some("95"));
    }

    #[test]
    fn test_display_title_fallbacks() {
        let with_title = record(r#"{"id": 8, "job_title": "Data Engineer"}"#).normalize();
        assert_eq!(with_title.display_title(), "Data Engineer");

        let with_role = record(r#"{"id": 9, "role": "ML Engineer"}"#).normalize();
        assert_eq!(with_role.display_title(), "ML Engineer");

        let bare = record(r#"{"id": 10}"#).normalize();
        assert_eq!(bare.display_title(), "Poste inconnu");
    }

    #[test]
    fn test_predict_form_wire_names() {
        let form = PredictForm {
            job_description: "desc".to_string(),
            role: "Data Engineer".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["JobDescription"], "desc");
        assert_eq!(value["role"], "Data Engineer");
        assert!(value.get("Industry").is_some());
        assert!(value.get("Sector").is_some());
        assert!(value.get("ownership_category").is_some());
        assert!(value.get("location").is_some());
    }
}
