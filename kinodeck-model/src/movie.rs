//! Movie catalog records and the normalization adapter.
//!
//! The backend serves movie payloads in two shapes: a TMDB-flavored one
//! (`poster_path`, `original_title`, `vote_average`, `genres: [{id,name}]`)
//! for archive metadata, and a platform-native one (`poster`, `categories:
//! [string]`, `viewPrice`, Mongo `_id`) for titles uploaded by filmmakers.
//! Everything downstream works with the canonical [`Movie`] produced here.
//!
//! Decoding is an explicit step: a payload either becomes a fully typed
//! [`Movie`] or a [`DecodeError`], never a partially filled record. The
//! batch helpers on top of that are total and swallow bad items so one
//! malformed entry cannot take down a whole catalog page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// A genre tag. TMDB-style payloads carry these directly; native payloads
/// carry bare category strings that get synthetic ids during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// Filmmaker attribution attached to native titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmmakerCredit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Which backend shape a raw payload was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieShape {
    /// Archive metadata: `poster_path`, `vote_average`, `genres` objects.
    Tmdb,
    /// Filmmaker uploads: `poster`, `categories`, camelCase price fields.
    Native,
}

/// Union of both backend shapes, decoded leniently.
///
/// Every field is optional here; required-ness is enforced when converting
/// to [`Movie`] so the error can name the missing field instead of
/// surfacing as an opaque serde failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    #[serde(default, deserialize_with = "lenient::id_string")]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub backdrop: Option<String>,
    #[serde(default, deserialize_with = "lenient::genres")]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default, alias = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub vote_average: Option<f32>,
    #[serde(default, alias = "avgRating", deserialize_with = "lenient::float")]
    pub avg_rating: Option<f32>,
    #[serde(default, alias = "viewPrice", deserialize_with = "lenient::float")]
    pub view_price: Option<f32>,
    #[serde(
        default,
        alias = "downloadPrice",
        deserialize_with = "lenient::float"
    )]
    pub download_price: Option<f32>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, alias = "videoUrl")]
    pub video_url: Option<String>,
    #[serde(default, alias = "allowDownload")]
    pub allow_download: Option<bool>,
    #[serde(default, deserialize_with = "lenient::filmmaker")]
    pub filmmaker: Option<FilmmakerCredit>,
}

impl RawMovie {
    /// Classify which backend shape this payload came from. Presence of
    /// `categories` or a native price field marks it as platform-native.
    pub fn shape(&self) -> MovieShape {
        if self.categories.is_some() || self.view_price.is_some() {
            MovieShape::Native
        } else {
            MovieShape::Tmdb
        }
    }
}

/// Canonical movie record used everywhere past the decode boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_price: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_price: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub allow_download: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filmmaker: Option<FilmmakerCredit>,
}

impl Movie {
    /// Decode a single JSON payload into the canonical record.
    ///
    /// Field precedence is first-non-null: `title` over `original_title`
    /// over `name`, `poster_path` over `poster`, and `categories` (mapped
    /// to synthetic genre ids) over `genres`. A payload missing both id
    /// variants or every title variant is rejected with the field named.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let raw: RawMovie = serde_json::from_value(value.clone())?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawMovie) -> Result<Self, DecodeError> {
        let id = raw
            .id
            .or(raw.mongo_id)
            .ok_or(DecodeError::MissingField("id"))?;
        let title = raw
            .title
            .or(raw.original_title)
            .or(raw.name)
            .ok_or(DecodeError::MissingField("title"))?;

        let genres = match raw.categories {
            Some(categories) => categories
                .into_iter()
                .enumerate()
                .map(|(index, name)| Genre {
                    id: index as u64 + 1,
                    name,
                })
                .collect(),
            None => raw.genres.unwrap_or_default(),
        };

        Ok(Movie {
            id,
            title,
            overview: raw.overview.or(raw.description),
            poster_path: raw.poster_path.or(raw.poster),
            backdrop_path: raw.backdrop_path.or(raw.backdrop),
            genres,
            release_date: raw.release_date,
            avg_rating: raw.vote_average.or(raw.avg_rating),
            view_price: raw.view_price,
            download_price: raw.download_price,
            currency: raw.currency,
            video_url: raw.video_url,
            allow_download: raw.allow_download.unwrap_or(false),
            filmmaker: raw.filmmaker,
        })
    }

    /// Whether a download purchase is allowed for this title.
    pub fn downloadable(&self) -> bool {
        self.allow_download
    }
}

/// Total single-item normalization: `None`, JSON null, and undecodable
/// payloads all collapse to `None`.
pub fn normalize(value: Option<&Value>) -> Option<Movie> {
    let value = value?;
    if value.is_null() {
        return None;
    }
    Movie::from_value(value).ok()
}

/// Total batch normalization: a non-array payload yields an empty vec and
/// undecodable items are skipped, so one malformed record never poisons
/// the rest of the page.
pub fn normalize_batch(value: &Value) -> Vec<Movie> {
    match value.as_array() {
        Some(items) => items.iter().filter_map(|item| normalize(Some(item))).collect(),
        None => Vec::new(),
    }
}

/// How a title was bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseKind {
    Stream,
    Download,
}

impl PurchaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseKind::Stream => "stream",
            PurchaseKind::Download => "download",
        }
    }
}

/// Settlement payload returned by the purchase endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseConfirmation {
    pub movie_id: String,
    pub kind: PurchaseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

mod lenient {
    //! Field deserializers tolerating the looser backend shape: numeric
    //! ids, ratings sent as strings, filmmaker credits sent as bare names.

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{FilmmakerCredit, Genre};

    /// Accept a string or a JSON number as an id, stringifying numbers.
    pub fn id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Accept a JSON number or a numeric string. Anything unparseable,
    /// non-finite, or of another type collapses to `None` rather than
    /// failing the whole record.
    pub fn float<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let parsed = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(parsed.filter(|f| f.is_finite()).map(|f| f as f32))
    }

    /// Accept a genre list, dropping malformed entries instead of failing.
    pub fn genres<'de, D>(deserializer: D) -> Result<Option<Vec<Genre>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value::<Genre>(item).ok())
                    .collect(),
            ),
            _ => None,
        }))
    }

    /// Accept a filmmaker credit as an object or as a bare name string.
    pub fn filmmaker<'de, D>(deserializer: D) -> Result<Option<FilmmakerCredit>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::String(name) => Some(FilmmakerCredit { id: None, name }),
            Value::Object(_) => serde_json::from_value::<FilmmakerCredit>(v).ok(),
            _ => None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tmdb_payload() -> Value {
        json!({
            "id": 27205,
            "original_title": "Inception",
            "overview": "A thief who steals corporate secrets.",
            "poster_path": "/inception.jpg",
            "backdrop_path": "/inception-wide.jpg",
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "release_date": "2010-07-16",
            "vote_average": 8.3
        })
    }

    fn native_payload() -> Value {
        json!({
            "_id": "64f1c0ffee",
            "title": "Harvest Moon",
            "description": "Independent drama set in rural Kenya.",
            "poster": "https://cdn.example.com/harvest.jpg",
            "categories": ["Drama", "Family"],
            "avgRating": "4.6",
            "viewPrice": 2.99,
            "downloadPrice": "5.99",
            "currency": "USD",
            "videoUrl": "https://cdn.example.com/harvest.mp4",
            "allowDownload": true,
            "filmmaker": {"id": "fm-1", "name": "A. Wanjiru"}
        })
    }

    #[test]
    fn tmdb_shape_decodes_with_tmdb_fields() {
        let raw: RawMovie = serde_json::from_value(tmdb_payload()).unwrap();
        assert_eq!(raw.shape(), MovieShape::Tmdb);

        let movie = Movie::from_raw(raw).unwrap();
        assert_eq!(movie.id, "27205");
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.poster_path.as_deref(), Some("/inception.jpg"));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.genres[0].name, "Action");
        assert_eq!(movie.avg_rating, Some(8.3));
        assert!(!movie.allow_download);
    }

    #[test]
    fn native_shape_decodes_with_native_fields() {
        let raw: RawMovie = serde_json::from_value(native_payload()).unwrap();
        assert_eq!(raw.shape(), MovieShape::Native);

        let movie = Movie::from_raw(raw).unwrap();
        assert_eq!(movie.id, "64f1c0ffee");
        assert_eq!(movie.title, "Harvest Moon");
        assert_eq!(movie.overview.as_deref(), Some("Independent drama set in rural Kenya."));
        assert_eq!(movie.poster_path.as_deref(), Some("https://cdn.example.com/harvest.jpg"));
        assert_eq!(movie.avg_rating, Some(4.6));
        assert_eq!(movie.view_price, Some(2.99));
        assert_eq!(movie.download_price, Some(5.99));
        assert!(movie.allow_download);
        assert_eq!(movie.filmmaker.as_ref().map(|f| f.name.as_str()), Some("A. Wanjiru"));
    }

    #[test]
    fn categories_win_over_genres_and_get_synthetic_ids() {
        let payload = json!({
            "id": 1,
            "title": "Both Shapes",
            "genres": [{"id": 99, "name": "Ignored"}],
            "categories": ["Thriller", "Mystery"]
        });
        let movie = Movie::from_value(&payload).unwrap();
        assert_eq!(
            movie.genres,
            vec![
                Genre { id: 1, name: "Thriller".into() },
                Genre { id: 2, name: "Mystery".into() },
            ]
        );
    }

    #[test]
    fn title_precedence_is_title_then_original_then_name() {
        let payload = json!({"id": 1, "original_title": "Original", "name": "Display"});
        let movie = Movie::from_value(&payload).unwrap();
        assert_eq!(movie.title, "Original");

        let payload = json!({"id": 1, "name": "Display"});
        let movie = Movie::from_value(&payload).unwrap();
        assert_eq!(movie.title, "Display");
    }

    #[test]
    fn missing_id_and_title_name_the_field() {
        let err = Movie::from_value(&json!({"title": "No Id"})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("id")));

        let err = Movie::from_value(&json!({"id": 7})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("title")));
    }

    #[test]
    fn rating_coercion_is_lenient_and_never_nan() {
        let movie = Movie::from_value(&json!({"id": 1, "title": "T", "avgRating": "4.2"})).unwrap();
        assert_eq!(movie.avg_rating, Some(4.2));

        let movie = Movie::from_value(&json!({"id": 1, "title": "T", "avgRating": "not a number"}))
            .unwrap();
        assert_eq!(movie.avg_rating, None);

        let movie = Movie::from_value(&json!({"id": 1, "title": "T", "avgRating": {"weird": true}}))
            .unwrap();
        assert_eq!(movie.avg_rating, None);
    }

    #[test]
    fn normalize_is_total() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some(&Value::Null)), None);
        assert_eq!(normalize(Some(&json!("just a string"))), None);
        assert_eq!(normalize(Some(&json!({"overview": "no id or title"}))), None);
        assert!(normalize(Some(&tmdb_payload())).is_some());
    }

    #[test]
    fn normalize_batch_skips_bad_items_and_tolerates_non_arrays() {
        let batch = json!([
            tmdb_payload(),
            null,
            {"overview": "undecodable"},
            native_payload(),
        ]);
        let movies = normalize_batch(&batch);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Inception");
        assert_eq!(movies[1].title, "Harvest Moon");

        assert!(normalize_batch(&json!({"data": []})).is_empty());
        assert!(normalize_batch(&Value::Null).is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        for payload in [tmdb_payload(), native_payload()] {
            let once = normalize(Some(&payload)).unwrap();
            let reencoded = serde_json::to_value(&once).unwrap();
            let twice = normalize(Some(&reencoded)).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn filmmaker_credit_accepts_bare_name() {
        let movie =
            Movie::from_value(&json!({"id": 1, "title": "T", "filmmaker": "B. Ochieng"})).unwrap();
        assert_eq!(movie.filmmaker, Some(FilmmakerCredit { id: None, name: "B. Ochieng".into() }));
    }
}
