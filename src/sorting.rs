// Sorting and filtering of already-fetched artwork pages

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::museums::Artwork;

/// Field to order a result page by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Artist,
    Date,
    Type,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "artist" => Ok(SortKey::Artist),
            "date" => Ok(SortKey::Date),
            "type" => Ok(SortKey::Type),
            other => Err(format!("Unknown sort key '{}', expected artist, date or type", other)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order '{}', expected asc or desc", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Case-insensitive, stable sort on `artist`.
pub fn sort_by_artist(records: &mut [Artwork], order: SortOrder) {
    records.sort_by(|a, b| order.apply(compare_ignore_case(&a.artist, &b.artist)));
}

/// Case-insensitive, stable sort on `type`. A missing type compares as "".
pub fn sort_by_type(records: &mut [Artwork], order: SortOrder) {
    records.sort_by(|a, b| {
        order.apply(compare_ignore_case(
            a.kind.as_deref().unwrap_or_default(),
            b.kind.as_deref().unwrap_or_default(),
        ))
    });
}

/// Chronological sort on `sortable_date`.
///
/// Records without a sortable date go last for both orders; only the dated
/// comparison is reversed by `Desc`.
pub fn sort_by_date(records: &mut [Artwork], order: SortOrder) {
    records.sort_by(|a, b| match (a.sortable_date, b.sortable_date) {
        (Some(x), Some(y)) => order.apply(x.cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub fn sort_artworks(records: &mut [Artwork], key: SortKey, order: SortOrder) {
    match key {
        SortKey::Artist => sort_by_artist(records, order),
        SortKey::Date => sort_by_date(records, order),
        SortKey::Type => sort_by_type(records, order),
    }
}

/// Keep records whose `type` matches `kind` case-insensitively. A blank term keeps everything.
pub fn filter_by_type(records: Vec<Artwork>, kind: &str) -> Vec<Artwork> {
    let kind = kind.trim().to_lowercase();
    if kind.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|a| a.kind.as_deref().map(str::to_lowercase).as_deref() == Some(kind.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::museums::MuseumSource;
    use proptest::prelude::*;

    fn dated(id: &str, year: Option<i32>) -> Artwork {
        let mut art = Artwork::with_defaults(MuseumSource::Cleveland, id);
        art.sortable_date = year;
        art
    }

    fn by_artist(id: &str, artist: &str) -> Artwork {
        let mut art = Artwork::with_defaults(MuseumSource::VictoriaAlbert, id);
        art.artist = artist.to_string();
        art
    }

    fn dates(records: &[Artwork]) -> Vec<Option<i32>> {
        records.iter().map(|a| a.sortable_date).collect()
    }

    fn ids(records: &[Artwork]) -> Vec<&str> {
        records.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_date_ascending_unknown_last() {
        let mut records = vec![dated("a", Some(-100)), dated("b", None), dated("c", Some(50))];
        sort_by_date(&mut records, SortOrder::Asc);
        assert_eq!(dates(&records), vec![Some(-100), Some(50), None]);
    }

    #[test]
    fn test_date_descending_unknown_still_last() {
        let mut records = vec![dated("a", Some(-100)), dated("b", None), dated("c", Some(50))];
        sort_by_date(&mut records, SortOrder::Desc);
        assert_eq!(dates(&records), vec![Some(50), Some(-100), None]);
    }

    #[test]
    fn test_unknown_dates_keep_input_order() {
        let mut records = vec![dated("x", None), dated("y", Some(1900)), dated("z", None)];
        sort_by_date(&mut records, SortOrder::Desc);
        assert_eq!(ids(&records), vec!["y", "x", "z"]);
    }

    #[test]
    fn test_artist_is_case_insensitive_and_stable() {
        let mut records = vec![
            by_artist("1", "vermeer"),
            by_artist("2", "Rembrandt"),
            by_artist("3", "Vermeer"),
            by_artist("4", "anonymous"),
        ];
        sort_by_artist(&mut records, SortOrder::Asc);
        assert_eq!(ids(&records), vec!["4", "2", "1", "3"]);

        sort_by_artist(&mut records, SortOrder::Desc);
        assert_eq!(ids(&records), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_type_sort_and_filter() {
        let mut records: Vec<Artwork> = ["Sculpture", "painting", "Painting"]
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let mut art = Artwork::with_defaults(MuseumSource::Rijksmuseum, i.to_string());
                art.kind = Some(kind.to_string());
                art
            })
            .collect();
        sort_by_type(&mut records, SortOrder::Asc);
        assert_eq!(ids(&records), vec!["1", "2", "0"]);

        let paintings = filter_by_type(records.clone(), "PAINTING");
        assert_eq!(ids(&paintings), vec!["1", "2"]);
        assert_eq!(filter_by_type(records, " ").len(), 3);
    }

    #[test]
    fn test_parse_sort_terms() {
        assert_eq!("Date".parse::<SortKey>(), Ok(SortKey::Date));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("title".parse::<SortKey>().is_err());
    }

    proptest! {
        #[test]
        fn prop_dated_records_precede_undated(
            years in proptest::collection::vec(proptest::option::of(-3000i32..2100), 0..40),
            desc in any::<bool>(),
        ) {
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            let mut records: Vec<Artwork> = years
                .iter()
                .enumerate()
                .map(|(i, y)| dated(&i.to_string(), *y))
                .collect();
            sort_by_date(&mut records, order);

            let first_unknown = records.iter().position(|a| a.sortable_date.is_none()).unwrap_or(records.len());
            prop_assert!(records[first_unknown..].iter().all(|a| a.sortable_date.is_none()));

            let known: Vec<i32> = records.iter().filter_map(|a| a.sortable_date).collect();
            for pair in known.windows(2) {
                match order {
                    SortOrder::Asc => prop_assert!(pair[0] <= pair[1]),
                    SortOrder::Desc => prop_assert!(pair[0] >= pair[1]),
                }
            }
        }
    }
}
