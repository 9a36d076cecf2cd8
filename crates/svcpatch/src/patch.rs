//! Text transformations over the service module's source.
//!
//! Everything here works on plain strings; reading and writing the file is
//! left to [`crate::file`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// The `toRad` helper, whole. `getArrivalTime` is inserted right after it.
pub const ANCHOR_PATTERN: &str =
    r"(  toRad\(degrees\) \{\s+return degrees \* \(Math\.PI / 180\);\s+\})";

/// From the doc comment of `getArrivalTime` to the end of the enclosing class.
pub const DUPLICATE_PATTERN: &str = r"\n\s*/\*\*\s+\* 指定したtripの指定した停留所での実際の到着時刻を取得[\s\S]*?async getArrivalTime\(tripId, stopId\)[\s\S]*?\n  \}\n\n\}";

/// Replaces a removed duplicate: an empty line, then the class's closing brace.
pub const CLOSER: &str = "\n\n}";

pub const METHOD_NAME: &str = "getArrivalTime";

/// Inserted verbatim after the anchor. The doc comment's first line is what
/// [`DUPLICATE_PATTERN`] keys on, so it must not be reworded.
pub const ARRIVAL_TIME_METHOD: &str = r#"
  /**
   * 指定したtripの指定した停留所での実際の到着時刻を取得
   * @param {string} tripId - トリップID
   * @param {string} stopId - 停留所ID
   * @returns {Promise<string|null>} 到着時刻（HH:MM:SS形式）またはnull
   */
  async getArrivalTime(tripId, stopId) {
    if (this.useDummyData) {
      return null;
    }

    try {
      await this.initializeDb();

      const stoptimes = await getStoptimes({
        trip_id: tripId,
        stop_id: stopId
      });

      if (stoptimes && stoptimes.length > 0) {
        // arrival_timeがあればそれを返す、なければdeparture_timeを返す
        return stoptimes[0].arrival_time || stoptimes[0].departure_time;
      }

      return null;
    } catch (error) {
      console.error('Error fetching arrival time:', error);
      return null;
    }
  }
"#;

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANCHOR_PATTERN).expect("anchor pattern is valid"));

static DUPLICATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DUPLICATE_PATTERN).expect("duplicate pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub content: String,
    /// Number of anchors the method was inserted after.
    pub anchors: usize,
}

/// Which duplicates [`remove_duplicates`] drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Only the second occurrence. A third one, if any, survives.
    #[default]
    SecondOnly,
    /// Every occurrence after the first.
    AllAfterFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dedup {
    pub content: String,
    /// Occurrences found before removal.
    pub found: usize,
    pub removed: usize,
    /// Character (not byte) index, in the input, of the first removed span.
    pub first_removed_at: Option<usize>,
}

/// Inserts [`ARRIVAL_TIME_METHOD`] after every anchor match.
///
/// With no anchor the content comes back unchanged and `anchors` is 0; deciding
/// whether that is an error is up to the caller.
pub fn insert_method(content: &str) -> Insertion {
    let mut anchors = 0;
    let patched = ANCHOR.replace_all(content, |caps: &Captures<'_>| {
        anchors += 1;
        format!("{}{}", &caps[1], ARRIVAL_TIME_METHOD)
    });
    Insertion {
        content: patched.into_owned(),
        anchors,
    }
}

/// Number of `getArrivalTime` blocks the duplicate pattern sees.
pub fn count_methods(content: &str) -> usize {
    DUPLICATE.find_iter(content).count()
}

pub fn remove_duplicates(content: &str, policy: DedupPolicy) -> Dedup {
    let matches: Vec<_> = DUPLICATE.find_iter(content).collect();
    let found = matches.len();
    let doomed = match policy {
        _ if found < 2 => &matches[..0],
        DedupPolicy::SecondOnly => &matches[1..2],
        DedupPolicy::AllAfterFirst => &matches[1..],
    };

    let mut patched = String::with_capacity(content.len());
    let mut last = 0;
    for m in doomed {
        patched.push_str(&content[last..m.start()]);
        patched.push_str(CLOSER);
        last = m.end();
    }
    patched.push_str(&content[last..]);

    Dedup {
        content: patched,
        found,
        removed: doomed.len(),
        first_removed_at: doomed.first().map(|m| content[..m.start()].chars().count()),
    }
}
