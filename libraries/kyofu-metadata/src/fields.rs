/// Mapping of lofty tag items onto catalog song fields
use kyofu_core::{ExtractionError, SongFields};
use lofty::{ItemKey, Tag};
use std::path::Path;

/// Parse a track or disc number written as `n` or `n/total`
pub fn parse_number(raw: &str) -> Option<u32> {
    raw.split('/').next()?.trim().parse().ok()
}

/// Parse a release year written as `YYYY` or as a date starting with it
/// (`YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM-DDTHH:MM`)
pub fn parse_year(raw: &str) -> Option<i32> {
    let year = raw.trim().split(&['-', '/', 'T'][..]).next()?.trim();
    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year.parse().ok()
}

/// First non-empty value stored under `key`
fn first_text(tag: &Tag, key: &ItemKey, field: &'static str, path: &Path) -> Option<String> {
    let values: Vec<&str> = tag
        .get_strings(key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if values.len() > 1 {
        tracing::warn!(
            "multiple values found: key={} path={}",
            field,
            path.display()
        );
    }

    values.first().map(|s| (*s).to_string())
}

fn required_text(
    tag: &Tag,
    key: &ItemKey,
    field: &'static str,
    path: &Path,
) -> Result<String, ExtractionError> {
    first_text(tag, key, field, path).ok_or_else(|| ExtractionError::MissingField {
        path: path.to_path_buf(),
        field,
    })
}

fn malformed(path: &Path, field: &'static str, value: String) -> ExtractionError {
    ExtractionError::MalformedField {
        path: path.to_path_buf(),
        field,
        value,
    }
}

/// Build `SongFields` from a tag.
///
/// Title, album, artist, genre, track number and date are required. Album
/// artist is optional and the disc number defaults to 1.
pub fn song_fields_from_tag(tag: &Tag, path: &Path) -> Result<SongFields, ExtractionError> {
    let title = required_text(tag, &ItemKey::TrackTitle, "title", path)?;
    let album = required_text(tag, &ItemKey::AlbumTitle, "album", path)?;
    let artist = required_text(tag, &ItemKey::TrackArtist, "artist", path)?;
    let album_artist = first_text(tag, &ItemKey::AlbumArtist, "album_artist", path);
    let genre = required_text(tag, &ItemKey::Genre, "genre", path)?;

    let raw_track = required_text(tag, &ItemKey::TrackNumber, "tracknumber", path)?;
    let track_number =
        parse_number(&raw_track).ok_or_else(|| malformed(path, "tracknumber", raw_track))?;

    let disc_number = match first_text(tag, &ItemKey::DiscNumber, "discnumber", path) {
        Some(raw) => parse_number(&raw).ok_or_else(|| malformed(path, "discnumber", raw))?,
        None => 1,
    };

    let raw_date = first_text(tag, &ItemKey::RecordingDate, "date", path)
        .or_else(|| first_text(tag, &ItemKey::Year, "date", path))
        .ok_or_else(|| ExtractionError::MissingField {
            path: path.to_path_buf(),
            field: "date",
        })?;
    let release_year = parse_year(&raw_date).ok_or_else(|| malformed(path, "date", raw_date))?;

    Ok(SongFields {
        title,
        album,
        artist,
        album_artist,
        genre,
        track_number,
        disc_number,
        release_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_totals() {
        assert_eq!(parse_number("3"), Some(3));
        assert_eq!(parse_number("3/12"), Some(3));
        assert_eq!(parse_number(" 07 / 10"), Some(7));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("A1"), None);
        assert_eq!(parse_number("/12"), None);
    }

    #[test]
    fn years_accept_dates() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("1999-05-01"), Some(1999));
        assert_eq!(parse_year("2004/02"), Some(2004));
        assert_eq!(parse_year("2010-01-01T12:00"), Some(2010));
        assert_eq!(parse_year("unknown"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("-5"), None);
    }
}
