use clap::Parser;

/// Command line options, each with an environment variable fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "booking_api", about = "HTTP service for booking slots")]
pub struct ConfigurationHandler {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    db_port: u16,

    #[arg(long, env = "DB_USER", default_value = "postgres")]
    db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    db_password: String,

    #[arg(long, env = "DB_NAME", default_value = "booking_api")]
    db_name: String,

    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    db_pool_size: u32,

    /// Keep bookings in memory instead of PostgreSQL (lost on restart)
    #[arg(long, env = "IN_MEMORY")]
    in_memory: bool,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn pool_size(&self) -> u32 {
        self.db_pool_size
    }

    /// `None` when bookings should be kept in memory.
    pub fn database_url(&self) -> Option<String> {
        if self.in_memory {
            return None;
        }
        // libpq keyword/value form, so the password needs no percent-encoding
        Some(format!(
            "host={} port={} user={} password={} dbname={}",
            quote(&self.db_host),
            self.db_port,
            quote(&self.db_user),
            quote(&self.db_password),
            quote(&self.db_name),
        ))
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
