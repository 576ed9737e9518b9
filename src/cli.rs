// src/cli.rs
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};

use crate::api::{ApiError, HrApiClient, Job, PredictForm};
use crate::config::EnvironmentConfig;
use crate::dashboard::{metrics, DashboardController, NavTab};
use crate::session::{Session, SessionStore};

#[derive(Parser)]
#[command(name = "hrpulse")]
#[command(about = "HR-Pulse recruiter dashboard, terminal edition")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the HR API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login {
        username: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a recruiter account
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Drop the stored session
    Logout,
    /// KPI overview: totals, average salary, top skill
    Overview,
    /// List job offers, optionally filtered by skill
    Jobs {
        #[arg(long)]
        skill: Option<String>,
    },
    /// List all extracted skills
    Skills,
    /// Predict a salary from a job description
    Predict {
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long, default_value = "")]
        ownership: String,
        #[arg(long, default_value = "")]
        industry: String,
        #[arg(long, default_value = "")]
        sector: String,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = EnvironmentConfig::load()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    let store = SessionStore::new(config.session_file());
    let client = HrApiClient::new(&config)?;

    match cli.command {
        Command::Login { username, password } => login(&store, &client, username, password).await,
        Command::Register {
            username,
            email,
            password,
        } => register(&client, username, email, password).await,
        Command::Logout => {
            store.clear()?;
            println!("✓ Session supprimée.");
            Ok(())
        }
        Command::Overview => {
            let controller = activate(&store, client).await?;
            render_overview(&controller);
            Ok(())
        }
        Command::Jobs { skill } => {
            let mut controller = activate(&store, client).await?;
            if let Some(skill) = skill {
                controller.select_skill(&skill).await;
            } else {
                controller.set_nav(NavTab::Jobs);
            }
            render_jobs(&controller);
            Ok(())
        }
        Command::Skills => {
            let controller = activate(&store, client).await?;
            render_skills(&controller);
            Ok(())
        }
        Command::Predict {
            description,
            location,
            role,
            ownership,
            industry,
            sector,
        } => {
            let mut controller = activate(&store, client).await?;
            controller.predictor.form = PredictForm {
                job_description: description,
                location,
                role,
                ownership_category: ownership,
                industry,
                sector,
            };
            controller.predict().await;
            render_prediction(&controller);
            Ok(())
        }
    }
}

async fn activate(store: &SessionStore, client: HrApiClient) -> Result<DashboardController> {
    match DashboardController::activate(store, client).await {
        Ok(controller) => Ok(controller),
        Err(_) => bail!("Aucune session active. Connectez-vous avec `hrpulse login <username>`."),
    }
}

async fn login(
    store: &SessionStore,
    client: &HrApiClient,
    username: String,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Mot de passe: ")?,
    };
    if username.is_empty() || password.is_empty() {
        bail!("Veuillez remplir tous les champs.");
    }

    match client.login(&username, &password).await {
        Ok(response) => {
            store.save(&Session::new(response.token, username.as_str()))?;
            println!("✓ Connecté en tant que {}.", username);
            Ok(())
        }
        Err(ApiError::Rejected { detail, .. }) => {
            bail!("{}", detail.unwrap_or_else(|| "Identifiants incorrects.".to_string()))
        }
        Err(ApiError::Transport(_)) => bail!("Erreur de connexion au serveur."),
    }
}

async fn register(
    client: &HrApiClient,
    username: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let (password, confirm) = match password {
        Some(password) => (password.clone(), password),
        None => (
            prompt("Mot de passe: ")?,
            prompt("Confirmer le mot de passe: ")?,
        ),
    };

    if username.is_empty() || email.is_empty() || password.is_empty() {
        bail!("Tous les champs sont obligatoires.");
    }
    if password != confirm {
        bail!("Les mots de passe ne correspondent pas.");
    }
    if password.chars().count() < 6 {
        bail!("Le mot de passe doit contenir au moins 6 caractères.");
    }

    match client.register(&username, &email, &password).await {
        Ok(()) => {
            println!("✓ Compte créé ! Connectez-vous avec `hrpulse login {}`.", username);
            Ok(())
        }
        Err(ApiError::Rejected { detail, .. }) => {
            bail!(
                "{}",
                detail.unwrap_or_else(|| "Erreur lors de l'inscription.".to_string())
            )
        }
        Err(ApiError::Transport(_)) => bail!("Erreur de connexion au serveur."),
    }
}

fn render_overview(controller: &DashboardController) {
    let skills = controller.skills.items();
    let jobs = controller.jobs.items();
    let average = metrics::average_salary(jobs);

    println!("Vue d'ensemble — Bienvenue, {}", controller.session().username);
    println!();
    println!("  Total Skills : {}", skills.len());
    println!("  Total Jobs   : {}", jobs.len());
    if average > 0 {
        println!("  Avg Salary   : ${}K", average);
    } else {
        println!("  Avg Salary   : N/A");
    }
    println!("  Top Skill    : {}", metrics::top_skill(skills));

    println!();
    println!("Offres récentes");
    if jobs.is_empty() {
        println!("  Aucune offre trouvée");
    }
    for job in jobs.iter().take(6) {
        println!("  {}", job_line(job));
    }

    println!();
    println!("Top Skills");
    for (i, skill) in skills.iter().take(8).enumerate() {
        println!("  {:02}. {}", i + 1, skill);
    }
}

fn render_jobs(controller: &DashboardController) {
    match &controller.active_skill {
        Some(skill) => println!(
            "Jobs pour \"{}\" ({})",
            skill,
            controller.filtered_jobs.len()
        ),
        None => println!("Tous les jobs ({})", controller.filtered_jobs.len()),
    }
    if controller.filtered_jobs.is_empty() {
        println!("  Aucun job trouvé pour ce skill.");
        return;
    }
    for job in &controller.filtered_jobs {
        println!("  {}", job_line(job));
        println!("      ID: {}", job.id);
    }
}

fn render_skills(controller: &DashboardController) {
    let skills = controller.skills.items();
    println!("Toutes les compétences ({})", skills.len());
    if skills.is_empty() {
        println!("  Aucune compétence trouvée.");
        return;
    }
    for (i, skill) in skills.iter().enumerate() {
        println!("  {:02}. {}", i + 1, skill);
    }
}

fn render_prediction(controller: &DashboardController) {
    if let Some(error) = &controller.predictor.error {
        println!("✗ {}", error);
        return;
    }
    let Some(salary) = controller.predictor.result else {
        return;
    };
    let (low, high) = metrics::salary_range(salary);

    println!("Salaire estimé : ${}", format_thousands(salary.round() as i64));
    println!(
        "Fourchette     : ${} – ${}",
        format_thousands(low),
        format_thousands(high)
    );
    println!("Confiance      : {}%", metrics::CONFIDENCE_PCT);
    println!(
        "Basé sur {} offres analysées",
        controller.jobs.items().len()
    );
}

fn job_line(job: &Job) -> String {
    let badges = metrics::skill_badges(job);
    let salary = job
        .salary_estimate
        .as_deref()
        .map(|s| format!("${}K", s))
        .unwrap_or_else(|| "N/A".to_string());
    if badges.is_empty() {
        format!("{} — {}", job.display_title(), salary)
    } else {
        format!("{} [{}] — {}", job.display_title(), badges.join(", "), salary)
    }
}

/// Thousands-separated rendering of a salary figure.
fn format_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}
