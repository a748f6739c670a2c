use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Ok,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Ok => "OK",
            Level::Error => "ERROR",
        }
    }

    fn default_emoji(self) -> &'static str {
        match self {
            Level::Debug => "🐛",
            Level::Info => "ℹ️",
            Level::Ok => "✅",
            Level::Error => "❌",
        }
    }
}

pub struct Logger {
    debug_enabled: bool,
    emojis_enabled: bool,
    json_mode: bool,
}

impl Logger {
    pub fn new(debug_enabled: bool, emojis_enabled: bool) -> Self {
        Self {
            debug_enabled,
            emojis_enabled,
            json_mode: false,
        }
    }

    /// In JSON mode stdout carries only the JSON document; human-readable
    /// lines other than errors are dropped.
    pub fn set_json_mode(&mut self, json_mode: bool) {
        self.json_mode = json_mode;
    }

    pub fn info(&self, message: &str, emoji: Option<&str>) {
        self.log(Level::Info, emoji, message);
    }

    pub fn error(&self, message: &str, emoji: Option<&str>) {
        eprintln!("{}", self.format_message(Level::Error, emoji, message));
    }

    pub fn success(&self, message: &str, emoji: Option<&str>) {
        self.log(Level::Ok, emoji, message);
    }

    pub fn debug(&self, message: &str, emoji: Option<&str>) {
        if self.debug_enabled {
            self.log(Level::Debug, emoji, message);
        }
    }

    fn log(&self, level: Level, emoji: Option<&str>, message: &str) {
        if !self.json_mode {
            println!("{}", self.format_message(level, emoji, message));
        }
    }

    fn format_message(&self, level: Level, emoji: Option<&str>, message: &str) -> String {
        if self.emojis_enabled {
            format!("{} {}", emoji.unwrap_or(level.default_emoji()), message)
        } else {
            format!("[{}] {}", level.label(), message)
        }
    }
}

pub fn print_json<T: Serialize>(data: &T) {
    if let Ok(pretty_json) = serde_json::to_string_pretty(data) {
        println!("{}", pretty_json);
    }
}
