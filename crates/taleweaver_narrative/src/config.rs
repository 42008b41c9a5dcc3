//! Engine configuration.

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use taleweaver_core::AudioFormat;
use taleweaver_error::{ConfigError, TaleweaverError, TaleweaverResult};
use tracing::{debug, instrument};

/// Smallest chapter count any configuration may allow.
const CHAPTER_FLOOR: u32 = 4;
/// Largest chapter count any configuration may allow.
const CHAPTER_CEILING: u32 = 60;

/// Story bounds and display rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySettings {
    /// Title used when title generation fails or returns nothing
    #[serde(default = "default_fallback_title")]
    pub fallback_title: String,

    /// Generated titles are cut to this many characters
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,

    /// Language the story is written in
    #[serde(default = "default_language")]
    pub language: String,

    /// Choice text quoted in an immoral-branch summary is cut to this length
    #[serde(default = "default_choice_summary_max_chars")]
    pub choice_summary_max_chars: usize,

    /// Youngest accepted listener
    #[serde(default = "default_min_target_age")]
    pub min_target_age: u8,

    /// Oldest accepted listener
    #[serde(default = "default_max_target_age")]
    pub max_target_age: u8,

    /// Shortest accepted story
    #[serde(default = "default_min_chapters")]
    pub min_chapters: u32,

    /// Longest accepted story
    #[serde(default = "default_max_chapters")]
    pub max_chapters: u32,
}

fn default_fallback_title() -> String {
    "A Surprising Adventure".to_string()
}

fn default_title_max_chars() -> usize {
    46
}

fn default_language() -> String {
    "English".to_string()
}

fn default_choice_summary_max_chars() -> usize {
    120
}

fn default_min_target_age() -> u8 {
    3
}

fn default_max_target_age() -> u8 {
    16
}

fn default_min_chapters() -> u32 {
    CHAPTER_FLOOR
}

fn default_max_chapters() -> u32 {
    CHAPTER_CEILING
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            fallback_title: default_fallback_title(),
            title_max_chars: default_title_max_chars(),
            language: default_language(),
            choice_summary_max_chars: default_choice_summary_max_chars(),
            min_target_age: default_min_target_age(),
            max_target_age: default_max_target_age(),
            min_chapters: default_min_chapters(),
            max_chapters: default_max_chapters(),
        }
    }
}

/// Values substituted for blank framing fields at story start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramingDefaults {
    /// Default mood
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Default goal
    #[serde(default = "default_mission")]
    pub mission: String,

    /// Prepended to the theme when no environment is given
    #[serde(default = "default_environment_prefix")]
    pub environment_prefix: String,

    /// Prepended to the player name when no character is given
    #[serde(default = "default_character_prefix")]
    pub character_prefix: String,
}

fn default_tone() -> String {
    "Adventure and kindness".to_string()
}

fn default_mission() -> String {
    "Go on an adventure and help someone".to_string()
}

fn default_environment_prefix() -> String {
    "An original place linked to the theme: ".to_string()
}

fn default_character_prefix() -> String {
    "A heroic child named ".to_string()
}

impl Default for FramingDefaults {
    fn default() -> Self {
        Self {
            tone: default_tone(),
            mission: default_mission(),
            environment_prefix: default_environment_prefix(),
            character_prefix: default_character_prefix(),
        }
    }
}

/// Text generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Sampling temperature sent with every request
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Raw generator output is cut to this many characters in logs
    #[serde(default = "default_log_excerpt_chars")]
    pub log_excerpt_chars: usize,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_log_excerpt_chars() -> usize {
    500
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            log_excerpt_chars: default_log_excerpt_chars(),
        }
    }
}

/// Pronunciation guidance prepended to voice style instructions for a locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleGuidance {
    /// Locale or bare language code, e.g. "en" or "fr-FR"
    pub locale: String,
    /// Guidance for adult voices
    pub adult: String,
    /// Guidance for child voices
    pub child: String,
}

/// Speech rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Locale used when a request does not name one
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Audio container requested from the renderer
    #[serde(default)]
    pub format: AudioFormat,

    /// Per-locale pronunciation guidance
    #[serde(default = "default_guidance")]
    pub guidance: Vec<LocaleGuidance>,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_guidance() -> Vec<LocaleGuidance> {
    vec![
        LocaleGuidance {
            locale: "en".to_string(),
            adult: [
                "You are a native English voice-over artist.",
                "Use clear, natural English pronunciation.",
                "Pronounce proper names carefully.",
                "Natural diction, fluid rhythm, clear articulation.",
            ]
            .join("\n"),
            child: [
                "You speak natural English.",
                "You have a child's voice: natural, spontaneous, slightly high-pitched. No professional adult diction.",
                "Pronounce proper names carefully.",
            ]
            .join("\n"),
        },
        LocaleGuidance {
            locale: "fr".to_string(),
            adult: [
                "Tu es une voix off française native (France).",
                "Parle en français avec un accent de France (pas d'accent anglais).",
                "Prononce correctement les noms propres français.",
                "Diction naturelle, rythme fluide, articulation claire.",
            ]
            .join("\n"),
            child: [
                "Tu parles en français avec un accent de France (pas d'accent anglais).",
                "Tu as une voix d'enfant : naturelle, spontanée, légèrement aiguë. Pas de diction adulte professionnelle.",
                "Prononce correctement les noms propres français.",
            ]
            .join("\n"),
        },
    ]
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            format: AudioFormat::default(),
            guidance: default_guidance(),
        }
    }
}

impl SpeechSettings {
    /// Guidance for `locale`, matched on the full tag first and then on the
    /// language part, ignoring case.
    pub fn guidance_for(&self, locale: &str) -> Option<&LocaleGuidance> {
        let locale = locale.trim();
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        self.guidance
            .iter()
            .find(|g| g.locale.eq_ignore_ascii_case(locale))
            .or_else(|| {
                self.guidance
                    .iter()
                    .find(|g| g.locale.eq_ignore_ascii_case(language))
            })
    }
}

/// Complete engine configuration.
///
/// # Examples
///
/// ```
/// use taleweaver_narrative::StoryEngineConfig;
///
/// let config = StoryEngineConfig::default();
/// assert_eq!(config.story().title_max_chars, 46);
/// assert_eq!(config.generation().temperature, 0.7);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct StoryEngineConfig {
    /// Story bounds and display rules
    #[serde(default)]
    story: StorySettings,

    /// Framing defaults
    #[serde(default)]
    defaults: FramingDefaults,

    /// Text generation parameters
    #[serde(default)]
    generation: GenerationSettings,

    /// Speech rendering parameters
    #[serde(default)]
    speech: SpeechSettings,
}

impl StoryEngineConfig {
    /// Load configuration from a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds
    /// inconsistent bounds.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> TaleweaverResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (taleweaver.toml shipped with the library)
    /// 2. User config in home directory (~/.config/taleweaver/taleweaver.toml)
    /// 3. User config in current directory (./taleweaver.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use taleweaver_narrative::StoryEngineConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = StoryEngineConfig::load()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> TaleweaverResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../taleweaver.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/taleweaver/taleweaver.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("taleweaver").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check that bounds are consistent.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first inconsistent value.
    pub fn validate(&self) -> TaleweaverResult<()> {
        let story = &self.story;
        if story.title_max_chars == 0 {
            return Err(ConfigError::new("story.title_max_chars must be positive").into());
        }
        if story.fallback_title.trim().is_empty() {
            return Err(ConfigError::new("story.fallback_title must not be blank").into());
        }
        if story.min_target_age > story.max_target_age {
            return Err(ConfigError::new(format!(
                "story.min_target_age ({}) exceeds story.max_target_age ({})",
                story.min_target_age, story.max_target_age
            ))
            .into());
        }
        if story.min_chapters < CHAPTER_FLOOR
            || story.max_chapters > CHAPTER_CEILING
            || story.min_chapters > story.max_chapters
        {
            return Err(ConfigError::new(format!(
                "story chapter bounds {}..={} must lie within {}..={}",
                story.min_chapters, story.max_chapters, CHAPTER_FLOOR, CHAPTER_CEILING
            ))
            .into());
        }
        if !self.generation.temperature.is_finite() || self.generation.temperature < 0.0 {
            return Err(ConfigError::new(format!(
                "generation.temperature must be a non-negative number, got {}",
                self.generation.temperature
            ))
            .into());
        }
        Ok(())
    }
}
