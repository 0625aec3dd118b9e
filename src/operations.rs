//! Queries over the song table.
//!
//! Each operation is implemented as a struct that implements the
//! [Operation](crate::operation::Operation) trait.
//!
//! Rankings use a stable sort, so songs with equal keys keep their load order.

use crate::error::ChartStatsError;
use crate::models::{self, Pagination, Song};
use crate::operation::Operation;
use crate::statistics::{self, ColumnStatistics};
use crate::table::Table;

use hashbrown::HashSet;

/// Smallest accepted number of top songs.
pub const MIN_TOP_N: i64 = 1;
/// Largest accepted number of top songs.
pub const MAX_TOP_N: i64 = 100;
/// Number of top songs returned when none is requested.
pub const DEFAULT_TOP_N: i64 = 10;
/// Page sizes above this are clamped to it.
pub const MAX_PER_PAGE: i64 = 100;
/// Number of songs in the engagement ranking.
pub const TOP_ENGAGED: usize = 10;

const ENGAGEMENT_DESCRIPTION: &str = "Engagement rate = (likes + comments) / views * 100";

/// Return the first song with the most views.
fn most_viewed(songs: &[Song]) -> Option<&Song> {
    songs
        .iter()
        .reduce(|best, song| if song.views > best.views { song } else { best })
}

/// Engagement rate of a song as a percentage rounded to 2 decimal places.
///
/// Returns `None` for a song with no views, whose rate is undefined.
pub fn engagement_rate(song: &Song) -> Option<f64> {
    if song.views == 0 {
        return None;
    }
    let interactions = song.likes as f64 + song.comments as f64;
    Some(statistics::round2(interactions / song.views as f64 * 100.0))
}

/// Overview of the whole dataset.
pub struct Summary {}

impl Operation for Summary {
    const NAME: &'static str = "summary";
    type Params = ();
    type Output = models::Summary;

    fn execute(table: &Table, _params: ()) -> Result<models::Summary, ChartStatsError> {
        let songs = table.songs();
        let (Some(top_song), Some(earliest), Some(latest)) = (
            most_viewed(songs),
            songs.iter().map(|song| &song.published).min(),
            songs.iter().map(|song| &song.published).max(),
        ) else {
            return Err(ChartStatsError::EmptyDataset {
                operation: Self::NAME,
            });
        };

        let views = ColumnStatistics::compute("views", &table.column(|song| song.views))?;
        let likes = ColumnStatistics::compute("likes", &table.column(|song| song.likes))?;
        let comments =
            ColumnStatistics::compute("comments", &table.column(|song| song.comments))?;
        let unique_artists = songs
            .iter()
            .map(|song| song.channel.as_str())
            .collect::<HashSet<_>>()
            .len();

        Ok(models::Summary {
            dataset_overview: models::DatasetOverview {
                total_songs: table.len(),
                date_range: models::DateRange {
                    earliest: earliest.clone(),
                    latest: latest.clone(),
                },
            },
            views_statistics: models::ViewsStatistics {
                total: views.total,
                mean: views.mean as u64,
                median: views.median as u64,
                std_dev: views.std_dev as u64,
                min: views.min,
                max: views.max,
            },
            likes_statistics: count_statistics(&likes),
            comments_statistics: count_statistics(&comments),
            top_song: models::TopSong {
                title: top_song.title.clone(),
                channel: top_song.channel.clone(),
                views: top_song.views,
            },
            unique_artists,
        })
    }
}

fn count_statistics(stats: &ColumnStatistics) -> models::CountStatistics {
    models::CountStatistics {
        total: stats.total,
        mean: stats.mean as u64,
        median: stats.median as u64,
    }
}

/// The most viewed songs, in descending order of views.
pub struct TopN {}

impl Operation for TopN {
    const NAME: &'static str = "top_n";
    /// Number of songs to return
    type Params = i64;
    type Output = models::TopSongs;

    fn execute(table: &Table, n: i64) -> Result<models::TopSongs, ChartStatsError> {
        if !(MIN_TOP_N..=MAX_TOP_N).contains(&n) {
            return Err(ChartStatsError::TopNOutOfRange {
                n,
                min: MIN_TOP_N,
                max: MAX_TOP_N,
            });
        }
        let mut ranked: Vec<&Song> = table.songs().iter().collect();
        ranked.sort_by(|a, b| b.views.cmp(&a.views));
        let songs: Vec<models::SongEntry> = ranked
            .into_iter()
            .take(n as usize)
            .map(models::SongEntry::from)
            .collect();
        Ok(models::TopSongs {
            count: songs.len(),
            songs,
        })
    }
}

/// Totals and averages over the songs of one artist.
///
/// The artist name matches any channel that contains it, ignoring case.
pub struct ArtistStats {}

impl Operation for ArtistStats {
    const NAME: &'static str = "artist_stats";
    /// Artist name
    type Params = String;
    type Output = models::ArtistStats;

    fn execute(table: &Table, artist: String) -> Result<models::ArtistStats, ChartStatsError> {
        let needle = artist.to_lowercase();
        let songs: Vec<&Song> = table
            .songs()
            .iter()
            .filter(|song| song.channel.to_lowercase().contains(&needle))
            .collect();
        if songs.is_empty() {
            return Err(ChartStatsError::ArtistNotFound { artist });
        }

        let total_views = statistics::total("views", songs.iter().map(|song| song.views))?;
        let total_likes = statistics::total("likes", songs.iter().map(|song| song.likes))?;
        let total_comments =
            statistics::total("comments", songs.iter().map(|song| song.comments))?;
        Ok(models::ArtistStats {
            artist,
            songs_count: songs.len(),
            total_views,
            total_likes,
            total_comments,
            avg_views_per_song: statistics::truncated_mean(total_views, songs.len()),
            avg_likes_per_song: statistics::truncated_mean(total_likes, songs.len()),
            avg_comments_per_song: statistics::truncated_mean(total_comments, songs.len()),
            songs: songs.into_iter().map(models::ArtistSong::from).collect(),
        })
    }
}

/// Engagement rate analysis.
///
/// Songs with no views have no engagement rate. They are left out of both the average and the
/// ranking and counted in `excluded_songs`.
pub struct Engagement {}

impl Operation for Engagement {
    const NAME: &'static str = "engagement";
    type Params = ();
    type Output = models::Engagement;

    fn execute(table: &Table, _params: ()) -> Result<models::Engagement, ChartStatsError> {
        if table.is_empty() {
            return Err(ChartStatsError::EmptyDataset {
                operation: Self::NAME,
            });
        }
        let mut rated: Vec<models::EngagedSong> = table
            .songs()
            .iter()
            .filter_map(|song| {
                engagement_rate(song).map(|engagement_rate| models::EngagedSong {
                    title: song.title.clone(),
                    channel: song.channel.clone(),
                    views: song.views,
                    likes: song.likes,
                    comments: song.comments,
                    engagement_rate,
                })
            })
            .collect();
        let excluded_songs = table.len() - rated.len();

        let rates: Vec<f64> = rated.iter().map(|song| song.engagement_rate).collect();
        let average = statistics::finite("engagement_rate", "mean", statistics::mean(&rates))?;

        rated.sort_by(|a, b| b.engagement_rate.total_cmp(&a.engagement_rate));
        rated.truncate(TOP_ENGAGED);
        Ok(models::Engagement {
            description: ENGAGEMENT_DESCRIPTION,
            average_engagement_rate: statistics::round2(average),
            excluded_songs,
            top_engaged_songs: rated,
        })
    }
}

/// One page of the song listing, in load order.
///
/// Pages past the end of the table, or before the first page, are empty. A page size below 1
/// takes the default size.
pub struct ListSongs {}

impl Operation for ListSongs {
    const NAME: &'static str = "list_songs";
    type Params = Pagination;
    type Output = models::SongPage;

    fn execute(
        table: &Table,
        pagination: Pagination,
    ) -> Result<models::SongPage, ChartStatsError> {
        let page = pagination.page;
        let per_page = match pagination.per_page {
            per_page if per_page < 1 => models::default_per_page(),
            per_page => per_page.min(MAX_PER_PAGE),
        };
        let total_songs = table.len();

        let page_index = page.checked_sub(1).map(usize::try_from);
        let songs = match page_index {
            Some(Ok(page_index)) => {
                let start = page_index.saturating_mul(per_page as usize);
                table
                    .songs()
                    .iter()
                    .skip(start)
                    .take(per_page as usize)
                    .map(models::SongEntry::from)
                    .collect()
            }
            _ => vec![],
        };

        Ok(models::SongPage {
            page,
            per_page,
            total_songs,
            total_pages: total_songs.div_ceil(per_page as usize),
            songs,
        })
    }
}
