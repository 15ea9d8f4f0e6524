//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external service traits
//! (index search, title resolution), allowing the whole request pipeline to be
//! exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use nyaa_addon_core::testing::{fixtures, MockResolver, MockSearcher};
//!
//! let searcher = MockSearcher::with_results(vec![
//!     fixtures::candidate("[Erai-raws] Frieren - 03 [1080p][VOSTFR]", "abc", 50),
//! ]);
//! let resolver = MockResolver::new();
//! resolver.set_title("tt22248376", "Frieren").await;
//!
//! // Use in a StreamHandler or AppState...
//! ```

mod mock_resolver;
mod mock_searcher;

pub use mock_resolver::MockResolver;
pub use mock_searcher::{MockSearcher, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::searcher::TorrentCandidate;

    /// Create a test candidate with reasonable defaults.
    ///
    /// The magnet URI is derived from `hash`, so distinct hashes are distinct
    /// candidates.
    pub fn candidate(title: &str, hash: &str, seeders: u32) -> TorrentCandidate {
        TorrentCandidate {
            title: title.to_string(),
            category: "Anime - English-translated".to_string(),
            link: format!("https://nyaa.si/view/{}", hash),
            magnet_uri: format!("magnet:?xt=urn:btih:{}", hash),
            size: "1.0 GiB".to_string(),
            date: "2024-01-01 00:00".to_string(),
            published_at: None,
            seeders,
            leechers: 1,
            downloads: 100,
        }
    }

    /// A trimmed Nyaa search result page.
    ///
    /// Rows: a complete Erai-raws release; a SubsPlease release with a comment
    /// link, non-numeric counts and no timestamp; a row without a magnet link.
    pub const SEARCH_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="table-responsive">
<table class="table table-bordered table-hover table-striped torrent-list">
<thead>
<tr>
  <th>Category</th><th>Name</th><th>Link</th><th>Size</th><th>Date</th>
  <th>S</th><th>L</th><th>C</th>
</tr>
</thead>
<tbody>
<tr class="success">
  <td><a href="/?c=1_2" title="Anime - English-translated"><img src="/static/img/icons/nyaa/1_2.png" alt="Anime - English-translated"></a></td>
  <td colspan="2">
    <a href="/view/1700001" title="[Erai-raws] Sousou no Frieren - 03 [1080p][Multiple Subtitle][VOSTFR]">[Erai-raws] Sousou no Frieren - 03 [1080p][Multiple Subtitle][VOSTFR]</a>
  </td>
  <td class="text-center">
    <a href="/download/1700001.torrent"><i class="fa fa-fw fa-download"></i></a>
    <a href="magnet:?xt=urn:btih:aaaa1111&amp;dn=frieren03"><i class="fa fa-fw fa-magnet"></i></a>
  </td>
  <td class="text-center">1.4 GiB</td>
  <td class="text-center" data-timestamp="1697212800">2023-10-13 16:00</td>
  <td class="text-center">523</td>
  <td class="text-center">12</td>
  <td class="text-center">10234</td>
</tr>
<tr class="default">
  <td><a href="/?c=1_2" title="Anime - English-translated"><img src="/static/img/icons/nyaa/1_2.png" alt="Anime - English-translated"></a></td>
  <td colspan="2">
    <a href="/view/1700002#comments" class="comments" title="3 comments"><i class="fa fa-comments-o"></i>3</a>
    <a href="/view/1700002" title="[SubsPlease] Sousou no Frieren - 03 (720p) [ABCD1234]">[SubsPlease] Sousou no Frieren - 03 (720p) [ABCD1234]</a>
  </td>
  <td class="text-center">
    <a href="/download/1700002.torrent"><i class="fa fa-fw fa-download"></i></a>
    <a href="magnet:?xt=urn:btih:bbbb2222&amp;dn=frieren03"><i class="fa fa-fw fa-magnet"></i></a>
  </td>
  <td class="text-center">700.2 MiB</td>
  <td class="text-center">2023-10-13 15:00</td>
  <td class="text-center">-</td>
  <td class="text-center"></td>
  <td class="text-center">7</td>
</tr>
<tr class="default">
  <td><a href="/?c=1_2" title="Anime - English-translated"></a></td>
  <td colspan="2"><a href="/view/1700003">[Nobody] Frieren - 03 No Magnet</a></td>
  <td class="text-center"><a href="/download/1700003.torrent"></a></td>
  <td class="text-center">500 MiB</td>
  <td class="text-center">2023-10-13 14:00</td>
  <td class="text-center">1</td>
  <td class="text-center">0</td>
  <td class="text-center">3</td>
</tr>
</tbody>
</table>
</div>
</body>
</html>
"#;
}
