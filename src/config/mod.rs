use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_standard_day_hours")]
    pub standard_day_hours: f64,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    #[serde(default = "default_vat_rate")]
    pub vat_rate: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_standard_day_hours() -> f64 {
    7.5
}
fn default_hourly_rate() -> f64 {
    97.0
}
fn default_vat_rate() -> f64 {
    0.20
}
fn default_currency() -> String {
    "GBP".to_string()
}
fn default_region() -> String {
    "england-and-wales".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            standard_day_hours: default_standard_day_hours(),
            hourly_rate: default_hourly_rate(),
            vat_rate: default_vat_rate(),
            currency: default_currency(),
            region: default_region(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            appdata.join("rtimesheet")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rtimesheet")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.sqlite")
    }

    /// Standard working day expressed in minutes.
    pub fn std_day_minutes(&self) -> i64 {
        (self.standard_day_hours * 60.0).round() as i64
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Default::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).expect("serializable config");
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
