//! Transports that fetch raw language documents
//!
//! A transport maps a language identifier to a [`TranslationNode`]. The
//! file transport reads `<base><lang>.<ext>` from disk and the HTTP one
//! fetches it from a URL prefix; [`select_transport`] picks between them.

use crate::document::TranslationNode;
use crate::error::{I18nError, I18nResult};
use crate::store::TranslationStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

#[cfg(feature = "http")]
use std::time::Duration;

/// Request timeout for the HTTP transport
#[cfg(feature = "http")]
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Language assumed by [`fetch_translations`] when a source name carries none
pub const UNNAMED_SOURCE_LANGUAGE: &str = "en";

/// Fetches the document for one language
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch and parse `lang`'s document
    async fn fetch(&self, lang: &str) -> I18nResult<TranslationNode>;
}

/// Document syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// `.json` and anything unrecognized
    #[default]
    Json,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl DocumentFormat {
    /// Format for an extension without the dot
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Self::Yaml,
            "toml" => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Format for the last path segment of a file path or URL
    pub fn from_location(location: &str) -> Self {
        Path::new(location)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Json, Self::from_extension)
    }

    /// Parse `content`; `location` is only used in error messages
    pub fn parse(self, content: &str, location: &str) -> I18nResult<TranslationNode> {
        let parse_error = |message: String| I18nError::ParseError {
            location: location.to_string(),
            message,
        };

        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
            Self::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        }
    }
}

/// Whether `base` names a local path: starts with `.` or `/`, or with a
/// drive letter such as `C:`
pub fn is_local_path(base: &str) -> bool {
    let mut chars = base.chars();
    match (chars.next(), chars.next()) {
        (Some('.' | '/'), _) => true,
        (Some(drive), Some(':')) => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Append a trailing `/` when missing
pub fn normalize_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

/// Where a document lives
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    Url(Url),
}

impl Location {
    /// Local paths and `file:` URLs are files, `http(s)` URLs are remote, and
    /// anything that is not a URL at all is a relative file path.
    fn parse(location: &str) -> Self {
        if is_local_path(location) {
            return Self::File(PathBuf::from(location));
        }

        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_or_else(|()| Self::File(PathBuf::from(location)), Self::File),
            _ => Self::File(PathBuf::from(location)),
        }
    }
}

async fn read_document(path: &Path, format: DocumentFormat) -> I18nResult<TranslationNode> {
    let location = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| I18nError::ResourceLoadError {
            path: location.clone(),
            source,
        })?;
    format.parse(&content, &location)
}

#[cfg(feature = "http")]
fn http_client(url: &str) -> I18nResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|source| I18nError::Network {
            url: url.to_string(),
            source,
        })
}

#[cfg(feature = "http")]
async fn get_document(
    client: &reqwest::Client,
    url: Url,
    format: DocumentFormat,
) -> I18nResult<TranslationNode> {
    let location = url.to_string();
    let network_error = |source| I18nError::Network {
        url: location.clone(),
        source,
    };

    let response = client.get(url).send().await.map_err(network_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(I18nError::HttpStatus {
            url: location,
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(network_error)?;
    format.parse(&body, &location)
}

/// Reads `<base><lang>.<ext>` from the filesystem
#[derive(Debug, Clone)]
pub struct FileTransport {
    base: PathBuf,
    extension: String,
    format: DocumentFormat,
}

impl FileTransport {
    /// Read from directory `base` with the given extension (no dot)
    pub fn new(base: impl AsRef<Path>, extension: &str) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
            extension: extension.to_string(),
            format: DocumentFormat::from_extension(extension),
        }
    }

    /// Path of `lang`'s document
    pub fn path_for(&self, lang: &str) -> PathBuf {
        self.base.join(format!("{lang}.{}", self.extension))
    }
}

#[async_trait]
impl Transport for FileTransport {
    async fn fetch(&self, lang: &str) -> I18nResult<TranslationNode> {
        let path = self.path_for(lang);
        debug!("Reading language file: {}", path.display());
        read_document(&path, self.format).await
    }
}

/// Fetches `<base><lang>.<ext>` over HTTP
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
    extension: String,
    format: DocumentFormat,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Fetch from URL prefix `base`; a trailing slash is added when missing
    pub fn new(base: &str, extension: &str) -> I18nResult<Self> {
        let normalized = normalize_base(base);
        let base = Url::parse(&normalized).map_err(|e| I18nError::InvalidUrl {
            url: normalized.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            client: http_client(&normalized)?,
            base,
            extension: extension.to_string(),
            format: DocumentFormat::from_extension(extension),
        })
    }

    /// URL of `lang`'s document
    pub fn url_for(&self, lang: &str) -> I18nResult<Url> {
        self.base
            .join(&format!("{lang}.{}", self.extension))
            .map_err(|e| I18nError::InvalidUrl {
                url: self.base.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, lang: &str) -> I18nResult<TranslationNode> {
        let url = self.url_for(lang)?;
        debug!("Fetching language document: {}", url);
        get_document(&self.client, url, self.format).await
    }
}

/// Pick a transport for `base`: files for local paths, HTTP for URLs
pub fn select_transport(base: &str, extension: &str) -> I18nResult<Arc<dyn Transport>> {
    match Location::parse(&normalize_base(base)) {
        Location::File(path) => Ok(Arc::new(FileTransport::new(path, extension))),
        #[cfg(feature = "http")]
        Location::Url(url) => Ok(Arc::new(HttpTransport::new(url.as_str(), extension)?)),
        #[cfg(not(feature = "http"))]
        Location::Url(url) => Err(I18nError::InvalidUrl {
            url: url.to_string(),
            message: "HTTP support is not enabled".to_string(),
        }),
    }
}

/// Language named by a source's trailing `<2-3 letters>.json`, lowercased
pub fn language_from_source(source: &str) -> Option<String> {
    let split = source.len().checked_sub(".json".len())?;
    if !source.get(split..)?.eq_ignore_ascii_case(".json") {
        return None;
    }
    let stem = &source[..split];

    let letters = stem
        .bytes()
        .rev()
        .take_while(u8::is_ascii_alphabetic)
        .take(3)
        .count();
    (letters >= 2).then(|| stem[stem.len() - letters..].to_ascii_lowercase())
}

async fn fetch_source(
    source: &str,
    #[cfg(feature = "http")] client: &reqwest::Client,
) -> I18nResult<TranslationNode> {
    let format = DocumentFormat::from_location(source);
    match Location::parse(source) {
        Location::File(path) => read_document(&path, format).await,
        #[cfg(feature = "http")]
        Location::Url(url) => get_document(client, url, format).await,
        #[cfg(not(feature = "http"))]
        Location::Url(url) => Err(I18nError::InvalidUrl {
            url: url.to_string(),
            message: "HTTP support is not enabled".to_string(),
        }),
    }
}

/// Load several documents into `store` at once.
///
/// Each source is a file path or URL; its language comes from
/// [`language_from_source`], else [`UNNAMED_SOURCE_LANGUAGE`]. A later source
/// for the same language replaces an earlier one. Failed sources are
/// reported and skipped. Returns the number of languages loaded.
pub async fn fetch_translations<I, S>(sources: I, store: &TranslationStore) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    #[cfg(feature = "http")]
    let client = match http_client("fetch_translations") {
        Ok(client) => client,
        Err(e) => {
            warn!("{}", e);
            return 0;
        }
    };

    let mut documents = BTreeMap::new();
    for source in sources {
        let source = source.as_ref();
        #[cfg(feature = "http")]
        let fetched = fetch_source(source, &client).await;
        #[cfg(not(feature = "http"))]
        let fetched = fetch_source(source).await;

        match fetched {
            Ok(document) => {
                let lang = language_from_source(source)
                    .unwrap_or_else(|| UNNAMED_SOURCE_LANGUAGE.to_string());
                debug!("Fetched {} as language: {}", source, lang);
                documents.insert(lang, document);
            }
            Err(e) => warn!("Failed to fetch {}: {}", source, e),
        }
    }

    let loaded = documents.len();
    store.load_translations(documents);
    loaded
}
