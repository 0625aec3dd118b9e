//! Data types and associated functions and methods

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One chart entry, as read from a row of the dataset.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Song {
    /// Song title
    pub title: String,
    /// Artist or channel name
    pub channel: String,
    /// Publication date
    pub published: String,
    /// Number of views
    pub views: u64,
    /// Number of likes
    pub likes: u64,
    /// Number of comments
    pub comments: u64,
}

impl Song {
    /// Return a new Song.
    pub fn new(
        title: &str,
        channel: &str,
        published: &str,
        views: u64,
        likes: u64,
        comments: u64,
    ) -> Self {
        Song {
            title: title.to_string(),
            channel: channel.to_string(),
            published: published.to_string(),
            views,
            likes,
            comments,
        }
    }
}

/// A song as listed by the top-N and pagination endpoints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SongEntry {
    pub title: String,
    pub channel: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

impl From<&Song> for SongEntry {
    fn from(song: &Song) -> Self {
        SongEntry {
            title: song.title.clone(),
            channel: song.channel.clone(),
            views: song.views,
            likes: song.likes,
            comments: song.comments,
        }
    }
}

/// A song within an artist's listing. The channel is implied.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArtistSong {
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

impl From<&Song> for ArtistSong {
    fn from(song: &Song) -> Self {
        ArtistSong {
            title: song.title.clone(),
            views: song.views,
            likes: song.likes,
            comments: song.comments,
        }
    }
}

/// A song together with its engagement rate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngagedSong {
    pub title: String,
    pub channel: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// `(likes + comments) / views * 100`, rounded to 2 decimal places
    pub engagement_rate: f64,
}

/// Earliest and latest publication dates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DateRange {
    pub earliest: String,
    pub latest: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_songs: usize,
    pub date_range: DateRange,
}

/// Statistics of the views column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewsStatistics {
    pub total: u64,
    pub mean: u64,
    pub median: u64,
    pub std_dev: u64,
    pub min: u64,
    pub max: u64,
}

/// Statistics of the likes and comments columns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountStatistics {
    pub total: u64,
    pub mean: u64,
    pub median: u64,
}

/// The most viewed song.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopSong {
    pub title: String,
    pub channel: String,
    pub views: u64,
}

/// Response of the dataset summary operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub dataset_overview: DatasetOverview,
    pub views_statistics: ViewsStatistics,
    pub likes_statistics: CountStatistics,
    pub comments_statistics: CountStatistics,
    pub top_song: TopSong,
    pub unique_artists: usize,
}

/// Response of the top-N operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopSongs {
    pub count: usize,
    pub songs: Vec<SongEntry>,
}

/// Response of the artist statistics operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArtistStats {
    /// Artist name as queried
    pub artist: String,
    pub songs_count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub avg_views_per_song: u64,
    pub avg_likes_per_song: u64,
    pub avg_comments_per_song: u64,
    pub songs: Vec<ArtistSong>,
}

/// Response of the engagement operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Engagement {
    pub description: &'static str,
    pub average_engagement_rate: f64,
    /// Songs with zero views, which have no engagement rate
    pub excluded_songs: usize,
    pub top_engaged_songs: Vec<EngagedSong>,
}

/// Response of the song listing operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SongPage {
    pub page: i64,
    pub per_page: i64,
    pub total_songs: usize,
    pub total_pages: usize,
    pub songs: Vec<SongEntry>,
}

/// Query string of the song listing endpoint.
///
/// Values that are not integers take their default, as does a `per_page` below 1.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Pagination {
    /// 1-indexed page number
    #[serde(default = "default_page", deserialize_with = "page_or_default")]
    pub page: i64,
    /// Number of songs per page, clamped to [crate::operations::MAX_PER_PAGE]
    #[serde(default = "default_per_page", deserialize_with = "per_page_or_default")]
    pub per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

fn default_page() -> i64 {
    1
}

/// Page size used when none, or a size below 1, is requested.
pub fn default_per_page() -> i64 {
    20
}

/// Parse a query value as an integer, or `None` if it is not one.
fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().parse().ok())
}

fn page_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(integer(deserializer)?.unwrap_or_else(default_page))
}

fn per_page_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(integer(deserializer)?
        .filter(|&per_page| per_page >= 1)
        .unwrap_or_else(default_per_page))
}

/// Response of the health endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    /// RFC 3339 time of the check
    pub timestamp: String,
    pub data_loaded: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub total_songs: usize,
    pub columns: Vec<String>,
}

/// Response of the API root: endpoint documentation and dataset metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiIndex {
    pub message: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub dataset_info: DatasetInfo,
}
