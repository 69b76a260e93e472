//! Content providers for the two wallpaper ingredients: a random landscape
//! photo URL and a random verse.
//!
//! Both providers are best-effort decoration sources. A remote API being down
//! should degrade the wallpaper, not kill the run, so every failure (network,
//! malformed JSON, missing field) is absorbed here and replaced with a fixed
//! fallback value. Neither operation ever fails outward.

use crate::{Result, SourceConfig};
use log::warn;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Fallback photo used when the photo API is unreachable or returns garbage
const FALLBACK_BACKGROUND_URL: &str =
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb";

/// Number of chapters verses are drawn from
const CHAPTER_COUNT: u32 = 114;

/// The Bismillah prefix appears in several Unicode-normalization variants
/// across editions; all must be recognized when stripping it from verse text.
/// The variants are mutually exclusive within one text, so replacement order
/// does not matter.
const OPENING_FORMULA_VARIANTS: [&str; 5] = [
    "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
    "بِّسۡمِ ٱللَّهِ ٱلرَّحۡمَـٰنِ ٱلرَّحِیمِ",
    "بِسْمِ اللَّٰهِ الرَّحْمَٰنِ الرَّحِيمِ",
    "بِسۡمِ ٱللَّهِ ٱلرَّحۡمَٰنِ ٱلرَّحِيمِ",
    "بِسۡمِ ٱللَّهِ ٱلرَّحۡمَـٰنِ ٱلرَّحِیمِ",
];

/// A background photograph, located by URL only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    pub url: String,
}

/// One verse with its renderable text forms and reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Original Arabic text, opening formula stripped
    pub original: String,
    pub translation: String,
    pub transliteration: String,
    /// Chapter (surah) number; `None` in the error placeholder
    pub chapter: Option<u32>,
    /// Verse (ayah) number within the chapter; `None` in the error placeholder
    pub verse_number: Option<u32>,
}

impl Verse {
    /// Placeholder returned when any stage of the verse lookup fails.
    /// All text fields communicate the error state so the rendered card is
    /// still legible.
    pub fn placeholder() -> Self {
        Self {
            original: "Error loading verse".to_string(),
            translation: "Please try again".to_string(),
            transliteration: "Error loading verse".to_string(),
            chapter: None,
            verse_number: None,
        }
    }
}

/// Strip every known opening-formula variant and trim the result.
///
/// Plain substring replacement, not regex: each variant is checked
/// independently.
pub fn strip_opening_formula(text: &str) -> String {
    let mut out = text.to_string();
    for variant in OPENING_FORMULA_VARIANTS {
        out = out.replace(variant, "");
    }
    out.trim().to_string()
}

// --- API response shapes ---

#[derive(Debug, Deserialize)]
struct PhotoResponse {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct ChapterResponse {
    data: Option<ChapterData>,
}

#[derive(Debug, Deserialize)]
struct ChapterData {
    #[serde(default)]
    ayahs: Vec<AyahEntry>,
}

#[derive(Debug, Deserialize)]
struct AyahEntry {
    /// Global verse identifier used for the follow-up edition lookups
    number: u64,
    #[serde(rename = "numberInSurah")]
    number_in_surah: u32,
    text: String,
}

#[derive(Debug, Deserialize)]
struct EditionResponse {
    data: EditionData,
}

#[derive(Debug, Deserialize)]
struct EditionData {
    text: String,
}

/// Random photo + random verse provider over a shared HTTP client
pub struct ContentSource {
    client: Client,
    config: SourceConfig,
}

impl ContentSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| {
                crate::Error::InitError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Fetch a random landscape photo URL.
    ///
    /// Never fails outward: any error is logged and the fixed fallback URL is
    /// returned instead.
    pub async fn background(&self) -> Background {
        match self.try_background().await {
            Ok(background) => background,
            Err(e) => {
                warn!("Error fetching background: {}", e);
                Background {
                    url: FALLBACK_BACKGROUND_URL.to_string(),
                }
            }
        }
    }

    async fn try_background(&self) -> Result<Background> {
        let url = Url::parse_with_params(
            &self.config.photo_endpoint,
            &[
                ("query", self.config.photo_query.as_str()),
                ("client_id", self.config.photo_credential.as_str()),
            ],
        )
        .map_err(|e| crate::Error::ConfigError(format!("Bad photo endpoint: {}", e)))?;

        let response: PhotoResponse = self.client.get(url).send().await?.json().await?;

        Ok(Background {
            url: response.urls.regular,
        })
    }

    /// Fetch a random verse with translation and transliteration.
    ///
    /// Never fails outward: any error at any stage is logged and a fixed
    /// placeholder verse is returned instead.
    pub async fn verse(&self) -> Verse {
        match self.try_verse().await {
            Ok(verse) => verse,
            Err(e) => {
                warn!("Error fetching verse: {}", e);
                Verse::placeholder()
            }
        }
    }

    async fn try_verse(&self) -> Result<Verse> {
        let chapter = rand::thread_rng().gen_range(1..=CHAPTER_COUNT);

        let chapter_url = format!("{}/surah/{}", self.config.scripture_endpoint, chapter);
        let response: ChapterResponse =
            self.client.get(&chapter_url).send().await?.json().await?;

        let ayahs = match response.data {
            Some(data) if !data.ayahs.is_empty() => data.ayahs,
            _ => {
                return Err(crate::Error::NetworkError(format!(
                    "Chapter {} returned an empty verse list",
                    chapter
                )))
            }
        };

        let index = rand::thread_rng().gen_range(0..ayahs.len());
        let ayah = &ayahs[index];

        let translation_url = format!(
            "{}/ayah/{}/en.sahih",
            self.config.scripture_endpoint, ayah.number
        );
        let transliteration_url = format!(
            "{}/ayah/{}/en.transliteration",
            self.config.scripture_endpoint, ayah.number
        );

        let translation: EditionResponse =
            self.client.get(&translation_url).send().await?.json().await?;
        let transliteration: EditionResponse = self
            .client
            .get(&transliteration_url)
            .send()
            .await?
            .json()
            .await?;

        Ok(Verse {
            original: strip_opening_formula(&ayah.text),
            translation: translation.data.text,
            transliteration: transliteration.data.text,
            chapter: Some(chapter),
            verse_number: Some(ayah.number_in_surah),
        })
    }
}
