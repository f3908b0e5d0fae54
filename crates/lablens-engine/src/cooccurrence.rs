use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use lablens_types::{CoOccurrencePair, EntityField, PairKey, Record, SessionKey};
use rayon::prelude::*;

/// Distinct entities of one session, sorted
type Session<'a> = BTreeSet<&'a str>;

/// Pair counters keyed by `(smaller, larger)` entity name
type Counts<'a> = HashMap<(&'a str, &'a str), u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SessionId<'a> {
    subject: &'a str,
    date: Option<NaiveDate>,
}

/// Count how often each unordered pair of distinct entities appears in the
/// same session.
///
/// Entities are deduplicated within a session, so a test repeated on the
/// same day pairs with each other test once. Pairs are returned by
/// frequency (descending), then name.
pub fn aggregate(
    records: &[Record],
    session_key: SessionKey,
    entity_field: EntityField,
) -> Vec<CoOccurrencePair> {
    let sessions = group_sessions(records, session_key, entity_field);
    let counts = count_pairs(sessions.values());

    tracing::debug!(
        records = records.len(),
        sessions = sessions.len(),
        pairs = counts.len(),
        "aggregated co-occurrences"
    );

    into_pairs(counts)
}

/// Parallel variant of [`aggregate`].
///
/// Sessions are fully grouped first, then split into `shards` chunks that
/// are counted independently and merged by summing matching keys.
pub fn aggregate_sharded(
    records: &[Record],
    session_key: SessionKey,
    entity_field: EntityField,
    shards: usize,
) -> Vec<CoOccurrencePair> {
    let sessions: Vec<Session<'_>> = group_sessions(records, session_key, entity_field)
        .into_values()
        .collect();
    if sessions.is_empty() {
        return Vec::new();
    }

    let chunk_size = sessions.len().div_ceil(shards.max(1));
    let counts = sessions
        .par_chunks(chunk_size)
        .map(|chunk| count_pairs(chunk.iter()))
        .reduce(HashMap::new, merge_counts);

    into_pairs(counts)
}

/// Highest-frequency pairs first, at most `limit` of them
pub fn top_pairs(pairs: &[CoOccurrencePair], limit: usize) -> Vec<CoOccurrencePair> {
    let mut sorted = pairs.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.key().cmp(&b.key())));
    sorted.truncate(limit);
    sorted
}

fn group_sessions(
    records: &[Record],
    session_key: SessionKey,
    entity_field: EntityField,
) -> HashMap<SessionId<'_>, Session<'_>> {
    let mut sessions: HashMap<SessionId<'_>, Session<'_>> = HashMap::new();

    for record in records {
        let id = SessionId {
            subject: &record.subject_id,
            date: match session_key {
                SessionKey::SubjectDay => Some(record.date),
                SessionKey::Subject => None,
            },
        };
        let entity = match entity_field {
            EntityField::TestName => record.test_name.as_str(),
            EntityField::ServiceUnit => record.service_unit.as_str(),
        };
        sessions.entry(id).or_default().insert(entity);
    }

    sessions
}

fn count_pairs<'a, 's>(sessions: impl Iterator<Item = &'s Session<'a>>) -> Counts<'a>
where
    'a: 's,
{
    let mut counts = Counts::new();

    for session in sessions {
        let entities: Vec<&str> = session.iter().copied().collect();
        for (i, a) in entities.iter().enumerate() {
            for b in &entities[i + 1..] {
                *counts.entry((*a, *b)).or_insert(0) += 1;
            }
        }
    }

    counts
}

fn merge_counts<'a>(mut into: Counts<'a>, from: Counts<'a>) -> Counts<'a> {
    for (key, count) in from {
        *into.entry(key).or_insert(0) += count;
    }
    into
}

fn into_pairs(counts: Counts<'_>) -> Vec<CoOccurrencePair> {
    let mut pairs: Vec<CoOccurrencePair> = counts
        .into_iter()
        .map(|((a, b), frequency)| CoOccurrencePair::from_key(PairKey::new(a, b), frequency))
        .collect();
    pairs.sort_by(|x, y| {
        y.frequency
            .cmp(&x.frequency)
            .then_with(|| x.entity_a.cmp(&y.entity_a))
            .then_with(|| x.entity_b.cmp(&y.entity_b))
    });
    pairs
}
