//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::{PlaybackRates, SessionLength};

use super::args::{is_valid_config_key, rate_key_clip, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;

    match key {
        "total_duration" => {
            let length: SessionLength = value.parse().map_err(|e| invalid(key, e))?;
            config.total_duration = Some(length.to_string());
        }
        "sounds_dir" => config.sounds_dir = Some(value.to_string()),
        "audio" => config.audio = Some(parse_bool(key, value)?),
        "notify" => config.notify = Some(parse_bool(key, value)?),
        "stop_cue" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Clip name must not be empty"));
            }
            config.stop_cue = Some(value.to_string());
        }
        _ => {
            let clip = rate_key_clip(key).ok_or_else(|| unknown_key(key))?;
            let rate = parse_rate(key, value)?;
            config
                .rates
                .get_or_insert_with(Default::default)
                .insert(clip.to_string(), rate);
        }
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;

    let value = match key {
        "total_duration" => config.total_duration,
        "sounds_dir" => config.sounds_dir,
        "audio" => config.audio.map(|b| b.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        "stop_cue" => config.stop_cue,
        _ => {
            let clip = rate_key_clip(key).ok_or_else(|| unknown_key(key))?;
            config
                .rates
                .as_ref()
                .and_then(|rates| rates.get(clip))
                .map(|rate| rate.to_string())
        }
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let or_not_set = |value: Option<String>| value.unwrap_or_else(|| NOT_SET.to_string());

    presenter.key_value("total_duration", &or_not_set(config.total_duration));
    presenter.key_value("sounds_dir", &or_not_set(config.sounds_dir));
    presenter.key_value("audio", &or_not_set(config.audio.map(|b| b.to_string())));
    presenter.key_value("notify", &or_not_set(config.notify.map(|b| b.to_string())));
    presenter.key_value("stop_cue", &or_not_set(config.stop_cue));

    match config.rates {
        Some(ref rates) if !rates.is_empty() => {
            for (clip, rate) in rates {
                presenter.key_value(&format!("rates.{}", clip), &rate.to_string());
            }
        }
        _ => presenter.key_value("rates", NOT_SET),
    }

    presenter.key_value("preroll", &describe_sequence(config.preroll.as_deref()));
    presenter.key_value("activity", &describe_sequence(config.activity.as_deref()));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(unknown_key(key))
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!(
            "Unknown key. Valid keys: {}, rates.<clip>",
            VALID_CONFIG_KEYS.join(", ")
        ),
    }
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Parse a boolean value
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, "Value must be 'true' or 'false'")),
    }
}

/// Parse a playback rate, applying the same rules as the config file
fn parse_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate: f32 = value
        .parse()
        .map_err(|_| invalid(key, "Value must be a number"))?;

    let clip = rate_key_clip(key).unwrap_or(key);
    PlaybackRates::from_map([(clip.to_string(), rate)].into_iter().collect())
        .map_err(|e| invalid(key, e))?;

    Ok(rate)
}

/// One-line summary of a configured sequence
fn describe_sequence(segments: Option<&[crate::domain::SegmentConfig]>) -> String {
    match segments {
        None => NOT_SET.to_string(),
        Some(segments) => segments
            .iter()
            .map(|s| format!("{} ({}s)", s.clip, s.duration))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
