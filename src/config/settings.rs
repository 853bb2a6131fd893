use crate::pairing::TieBreak;

#[derive(Debug, Clone)]
pub struct PairingSettings {
    pub tie_break: TieBreak,
    /// Ordering for one more attempt after a greedy dead end
    pub fallback_tie_break: Option<TieBreak>,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::OpponentWins,
            fallback_tie_break: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "swiss_tournament.db".to_string()),
            pool_size: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub default_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { default_port: 3000 }
    }
}

impl ServerSettings {
    pub fn port(&self, requested: Option<u16>) -> u16 {
        requested.unwrap_or(self.default_port)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pairing: PairingSettings,
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            pairing: PairingSettings::default(),
            database: DatabaseSettings::default(),
            server: ServerSettings::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: Option<TieBreak>) -> Self {
        if let Some(tie_break) = tie_break {
            self.pairing.tie_break = tie_break;
        }
        self
    }

    pub fn with_fallback_tie_break(mut self, fallback: Option<TieBreak>) -> Self {
        if fallback.is_some() {
            self.pairing.fallback_tie_break = fallback;
        }
        self
    }
}
