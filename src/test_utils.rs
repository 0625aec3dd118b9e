use crate::models::Song;
use crate::table::Table;

/// Create the `index`th test song, with one of `channels` distinct channel names.
pub(crate) fn get_test_song(index: usize, channels: usize) -> Song {
    let index_u64 = index as u64;
    Song::new(
        &format!("Song {}", index),
        &format!("Channel {}", index % channels),
        &format!("2024-{:02}-{:02}", index % 12 + 1, index % 28 + 1),
        1_000 + (index_u64 * 7_919) % 1_000,
        10 + (index_u64 % 13) * 3,
        index_u64 % 5,
    )
}

/// Create a table of `songs` test songs spread over `channels` distinct channel names.
pub(crate) fn get_test_table(songs: usize, channels: usize) -> Table {
    Table::from_songs((0..songs).map(|i| get_test_song(i, channels)).collect())
}
