//! Query classification by seed richness

/// How much seed information a query carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    /// No seed songs and no seed tags
    Empty,
    /// At most three seed songs (includes tag-only queries)
    Sparse,
    /// Four or more seed songs
    Rich,
}

impl QueryStatus {
    pub fn classify(song_count: usize, tag_count: usize) -> Self {
        if song_count == 0 && tag_count == 0 {
            QueryStatus::Empty
        } else if song_count <= 3 {
            QueryStatus::Sparse
        } else {
            QueryStatus::Rich
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Empty => "empty",
            QueryStatus::Sparse => "sparse",
            QueryStatus::Rich => "rich",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(QueryStatus::classify(0, 0), QueryStatus::Empty);
        assert_eq!(QueryStatus::classify(1, 0), QueryStatus::Sparse);
        assert_eq!(QueryStatus::classify(3, 0), QueryStatus::Sparse);
        assert_eq!(QueryStatus::classify(4, 0), QueryStatus::Rich);
        assert_eq!(QueryStatus::classify(2, 5), QueryStatus::Sparse);
        assert_eq!(QueryStatus::classify(0, 3), QueryStatus::Sparse);
        assert_eq!(QueryStatus::classify(40, 12), QueryStatus::Rich);
    }

    #[test]
    fn test_totality_over_grid() {
        for songs in 0..12 {
            for tags in 0..12 {
                let status = QueryStatus::classify(songs, tags);
                let expected = match (songs, tags) {
                    (0, 0) => QueryStatus::Empty,
                    (s, _) if s >= 4 => QueryStatus::Rich,
                    _ => QueryStatus::Sparse,
                };
                assert_eq!(status, expected, "songs={} tags={}", songs, tags);
            }
        }
    }
}
