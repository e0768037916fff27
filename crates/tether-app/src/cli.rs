use clap::{Parser, ValueEnum};

/// Tether — demo host for the runtime interop bridge.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about)]
pub struct Args {
    /// Which demo scenario to run.
    #[arg(value_enum, default_value_t = Demo::All)]
    pub demo: Demo,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log directive override (e.g. "tether=debug").
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    Toast,
    Sensor,
    Webview,
    All,
}

impl Demo {
    pub fn includes(self, other: Demo) -> bool {
        self == Demo::All || self == other
    }
}

pub fn parse() -> Args {
    Args::parse()
}
