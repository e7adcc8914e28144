use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from: String,
}

impl EmailConfig {
    /// Returns `None` when `SMTP_HOST` is unset; mail is then only logged.
    pub fn init() -> Result<Option<Self>> {
        let Ok(smtp_host) = std::env::var("SMTP_HOST") else {
            return Ok(None);
        };

        let smtp_user =
            std::env::var("SMTP_USERNAME").context("Missing environment variable: SMTP_USERNAME")?;
        let smtp_pass =
            std::env::var("SMTP_PASSWORD").context("Missing environment variable: SMTP_PASSWORD")?;
        let smtp_port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid u16 integer")?;
        let from = std::env::var("EMAIL_FROM").unwrap_or_else(|_| "no-reply@marsafyi.com".into());

        Ok(Some(Self {
            smtp_server: smtp_host,
            smtp_port,
            smtp_user,
            smtp_pass,
            from,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub frontend_url: String,
    pub cors_origin: Option<String>,
    pub email_config: Option<EmailConfig>,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = parse_bool_flag("RUN_MIGRATIONS", &run_migrations_str)?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let bcrypt_cost = match std::env::var("BCRYPT_COST") {
            Ok(value) => value
                .parse::<u32>()
                .context("BCRYPT_COST must be a valid integer")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let cors_origin = std::env::var("CORS_ORIGIN").ok();

        let email_config = EmailConfig::init().context("failed email config")?;

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            bcrypt_cost,
            frontend_url,
            cors_origin,
            email_config,
        })
    }
}

fn parse_bool_flag(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool_flag;

    #[test]
    fn bool_flags_accept_only_true_or_false() {
        assert!(parse_bool_flag("RUN_MIGRATIONS", "true").unwrap());
        assert!(!parse_bool_flag("RUN_MIGRATIONS", "false").unwrap());

        let err = parse_bool_flag("RUN_MIGRATIONS", "yes").unwrap_err();
        assert!(err.to_string().contains("RUN_MIGRATIONS"));
    }
}
