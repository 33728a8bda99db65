use std::env;

/// Runtime configuration, read once at startup. Every knob has a default so
/// the server can boot from a bare environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub server_host: String,
    pub server_port: u16,
    pub secret_key: String,
    pub cors_origin: String,
    pub cors_credentials: bool,
    pub api_base_path: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_host: env_or("DB_HOST", "localhost"),
            db_port: env_or("DB_PORT", "5432")
                .parse()
                .expect("DB_PORT must be a number"),
            db_user: env_or("DB_USER", "postgres"),
            db_password: env_or("DB_PASSWORD", ""),
            db_name: env_or("DB_NAME", "tasks_db"),
            server_host: env_or("HOST", "127.0.0.1"),
            server_port: env_or("PORT", "3000")
                .parse()
                .expect("PORT must be a number"),
            secret_key: env_or("SECRET_KEY", "secretKey"),
            cors_origin: env_or("ORIGIN", "*"),
            cors_credentials: env_or("CREDENTIALS", "true") == "true",
            api_base_path: env_or("API_BASE_PATH", ""),
        }
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}
