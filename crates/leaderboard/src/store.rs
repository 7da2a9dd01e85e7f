//! In-memory score store.
//!
//! Scores are kept in rank order (score descending, then newest first) so
//! listing, ranking and the highest-score lookup never sort on the read path.

use std::collections::HashMap;
use std::net::IpAddr;

use crate::error::StoreError;
use crate::protocol::{
    NewScore, Pagination, RankedScore, ScoreEntry, ScoreStats, SubmitResult, TopPlayer,
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, TOP_N,
};

/// One email may submit at most once per window.
pub const RATE_LIMIT_WINDOW_MS: u64 = 5 * 60 * 1000;

/// Default capacity of [`ScoreStore::new`].
pub const DEFAULT_MAX_SCORES: usize = 100_000;

/// A persisted score record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredScore {
    pub player_name: String,
    pub player_email: String,
    pub score: u32,
    /// Milliseconds since the Unix epoch.
    pub date: u64,
    /// Address the submission came from, when the server tracks it.
    pub client_ip: Option<IpAddr>,
    seq: u64,
}

impl StoredScore {
    fn entry(&self) -> ScoreEntry {
        ScoreEntry {
            player_name: self.player_name.clone(),
            score: self.score,
            date: self.date,
        }
    }

    /// Rank order: higher score first, then newer date, then later insert.
    fn ranks_before(&self, other: &StoredScore) -> bool {
        (self.score, self.date, self.seq) > (other.score, other.date, other.seq)
    }
}

/// Normalised page request for [`ScoreStore::page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build from raw query values.
    ///
    /// Missing, unparsable or non-positive values fall back to the defaults;
    /// `limit` is clamped to [`MAX_PAGE_LIMIT`].
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let positive = |raw: Option<&str>| {
            raw.and_then(|s| s.trim().parse::<i64>().ok())
                .filter(|&n| n > 0)
        };
        let page = positive(page).map_or(1, |n| n.min(i64::from(u32::MAX)) as u32);
        let limit = positive(limit).map_or(DEFAULT_PAGE_LIMIT, |n| {
            n.min(i64::from(MAX_PAGE_LIMIT)) as u32
        });
        Self { page, limit }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreStore {
    ranked: Vec<StoredScore>,
    capacity: usize,
    next_seq: u64,
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCORES)
    }
}

impl ScoreStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            ranked: Vec::new(),
            capacity: capacity.max(1),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent submission inside the rate limit window by `email` or,
    /// when given, from `client_ip`.
    pub fn recent_submission(
        &self,
        email: &str,
        client_ip: Option<IpAddr>,
        now_ms: u64,
    ) -> Option<&StoredScore> {
        let cutoff = now_ms.saturating_sub(RATE_LIMIT_WINDOW_MS);
        self.ranked
            .iter()
            .filter(|s| s.date >= cutoff)
            .filter(|s| {
                s.player_email == email || (client_ip.is_some() && s.client_ip == client_ip)
            })
            .max_by_key(|s| (s.date, s.seq))
    }

    /// Record a validated score at `now_ms`, throttled by email only.
    ///
    /// `is_new_high_score` is true when the new score equals the best score
    /// on record after the insert, so a tie with the leader counts.
    pub fn submit(&mut self, score: NewScore, now_ms: u64) -> Result<SubmitResult, StoreError> {
        self.submit_from(score, None, now_ms)
    }

    /// Like [`ScoreStore::submit`], additionally refusing a second submission
    /// from the same `client_ip` inside the window.
    pub fn submit_from(
        &mut self,
        score: NewScore,
        client_ip: Option<IpAddr>,
        now_ms: u64,
    ) -> Result<SubmitResult, StoreError> {
        if let Some(recent) = self.recent_submission(&score.player_email, client_ip, now_ms) {
            let retry_after_ms = (recent.date + RATE_LIMIT_WINDOW_MS).saturating_sub(now_ms);
            return Err(StoreError::RateLimited { retry_after_ms });
        }
        if self.ranked.len() >= self.capacity {
            return Err(StoreError::Full {
                capacity: self.capacity,
            });
        }

        let record = StoredScore {
            player_name: score.player_name,
            player_email: score.player_email,
            score: score.score,
            date: now_ms,
            client_ip,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let at = self.ranked.partition_point(|s| s.ranks_before(&record));
        let result = SubmitResult {
            player_name: record.player_name.clone(),
            score: record.score,
            is_new_high_score: self.ranked.first().map_or(true, |best| record.score >= best.score),
        };
        self.ranked.insert(at, record);
        Ok(result)
    }

    /// One page of the ranked list plus pagination metadata.
    pub fn page(&self, req: PageRequest) -> (Vec<ScoreEntry>, Pagination) {
        let limit = req.limit.max(1) as usize;
        let page = req.page.max(1);
        let total = self.ranked.len();
        let total_pages = total.div_ceil(limit);
        let skip = (page as usize - 1).saturating_mul(limit);

        let data = self
            .ranked
            .iter()
            .skip(skip)
            .take(limit)
            .map(StoredScore::entry)
            .collect();

        let pagination = Pagination {
            current_page: page,
            total_pages: total_pages as u32,
            total_scores: total as u32,
            has_next: (page as usize) < total_pages,
            has_prev: page > 1,
        };
        (data, pagination)
    }

    /// The five best scores with 1-based positions.
    pub fn top5(&self) -> Vec<RankedScore> {
        self.ranked
            .iter()
            .take(TOP_N)
            .zip(1u32..)
            .map(|(s, position)| RankedScore {
                position,
                player_name: s.player_name.clone(),
                score: s.score,
                date: s.date,
            })
            .collect()
    }

    pub fn highest(&self) -> Option<ScoreEntry> {
        self.ranked.first().map(StoredScore::entry)
    }

    pub fn stats(&self) -> ScoreStats {
        let total_games = self.ranked.len();
        if total_games == 0 {
            return ScoreStats {
                highest_score: 0,
                lowest_score: 0,
                average_score: 0.0,
                total_games: 0,
                total_players: 0,
                top_players: Vec::new(),
            };
        }

        let sum: u64 = self.ranked.iter().map(|s| u64::from(s.score)).sum();
        let average = sum as f64 / total_games as f64;

        struct PlayerAgg<'a> {
            name: &'a str,
            first_seq: u64,
            max_score: u32,
            games: u32,
        }

        let mut players: HashMap<&str, PlayerAgg<'_>> = HashMap::new();
        for s in &self.ranked {
            let agg = players.entry(s.player_email.as_str()).or_insert(PlayerAgg {
                name: &s.player_name,
                first_seq: s.seq,
                max_score: 0,
                games: 0,
            });
            if s.seq < agg.first_seq {
                agg.first_seq = s.seq;
                agg.name = &s.player_name;
            }
            agg.max_score = agg.max_score.max(s.score);
            agg.games += 1;
        }
        let total_players = players.len() as u32;

        let mut aggs: Vec<PlayerAgg<'_>> = players.into_values().collect();
        aggs.sort_by(|a, b| {
            b.max_score
                .cmp(&a.max_score)
                .then(a.first_seq.cmp(&b.first_seq))
        });
        let top_players = aggs
            .into_iter()
            .take(TOP_N)
            .map(|a| TopPlayer {
                player_name: a.name.to_string(),
                max_score: a.max_score,
                games_played: a.games,
            })
            .collect();

        ScoreStats {
            highest_score: self.ranked.first().map_or(0, |s| s.score),
            lowest_score: self.ranked.last().map_or(0, |s| s.score),
            average_score: (average * 100.0).round() / 100.0,
            total_games: total_games as u32,
            total_players,
            top_players,
        }
    }
}
