use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, ErrorKind};
use crate::util::request;

/// One page of a list response: the item array plus whatever pagination
/// metadata the deployment returns. A response without an `items` array is
/// rejected as malformed before it ever reaches the loop.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
    pub total: Option<u64>,
}

/// Per-deployment pagination convention.
///
/// The remote API fixes the parameter names, not this crate, so they are
/// configuration rather than constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pager {
    /// Cursor deployments: thread the response's `nextCursor` back as a
    /// query parameter until the server stops returning one.
    Cursor {
        cursor_param: String,
        limit_param: String,
    },
    /// Offset deployments: advance an offset by the number of items
    /// received until a page comes back empty or short.
    Offset {
        offset_param: String,
        limit_param: String,
    },
}

impl Default for Pager {
    fn default() -> Self {
        Pager::Cursor {
            cursor_param: "next".to_string(),
            limit_param: "limit".to_string(),
        }
    }
}

impl Pager {
    pub fn offset() -> Self {
        Pager::Offset {
            offset_param: "offset".to_string(),
            limit_param: "limit".to_string(),
        }
    }
}

/// Observer notified after each fetched page with the number of pages
/// fetched so far and the running item total. Side effect only; the
/// aggregated result is unaffected by what an observer does.
pub trait Progress {
    fn page_fetched(&mut self, pages: u32, items: usize);
}

/// The no-op observer.
pub struct NoProgress;

impl Progress for NoProgress {
    fn page_fetched(&mut self, _pages: u32, _items: usize) {}
}

/// Fetches every page of a list endpoint and concatenates the item arrays
/// in fetch order.
///
/// The loop terminates when the server signals a terminal page: an absent
/// `nextCursor` or an empty page in cursor mode, an empty or short page in
/// offset mode. Errors from the request layer propagate unchanged and abort
/// the whole call; no partial result is returned. `cfg.max_pages` bounds
/// the loop against a server that never produces a terminal page.
pub fn paginate<T: DeserializeOwned>(
    cfg: &Config,
    method: Method,
    path: &str,
    params: &[(String, String)],
    page_size: u32,
    progress: &mut dyn Progress,
) -> Result<Vec<T>, Error> {
    run_pager(&cfg.pager, page_size, cfg.max_pages, progress, |page_query| {
        let mut query: Vec<(String, String)> = params.to_vec();
        query.extend_from_slice(page_query);
        request::send(cfg, method.clone(), path, &query)
    })
}

/// The pagination loop itself, with the page fetch injected so the
/// advance/terminate logic is testable without a network.
fn run_pager<T, F>(
    pager: &Pager,
    page_size: u32,
    max_pages: Option<u32>,
    progress: &mut dyn Progress,
    mut fetch: F,
) -> Result<Vec<T>, Error>
where
    F: FnMut(&[(String, String)]) -> Result<Page<T>, Error>,
{
    let mut out: Vec<T> = Vec::new();
    let mut pages: u32 = 0;
    let mut cursor: Option<String> = None;
    let mut offset: u64 = 0;

    loop {
        if let Some(max) = max_pages {
            if pages >= max {
                return Err(ErrorKind::PaginationLimitExceeded { pages }.into());
            }
        }

        let page = fetch(&page_query(pager, page_size, &cursor, offset))?;
        pages += 1;

        let received = page.items.len();
        out.extend(page.items);
        progress.page_fetched(pages, out.len());
        debug!("page {}: {} items ({} total)", pages, received, out.len());

        let done = match pager {
            Pager::Cursor { .. } => {
                cursor = page.next_cursor;
                received == 0 || cursor.is_none()
            }
            Pager::Offset { .. } => {
                offset += received as u64;
                received == 0 || (received as u64) < u64::from(page_size)
            }
        };

        if done {
            return Ok(out);
        }
    }
}

/// Query parameters selecting the next page under the given convention.
fn page_query(
    pager: &Pager,
    page_size: u32,
    cursor: &Option<String>,
    offset: u64,
) -> Vec<(String, String)> {
    match pager {
        Pager::Cursor {
            cursor_param,
            limit_param,
        } => {
            let mut query = vec![(limit_param.clone(), page_size.to_string())];
            if let Some(c) = cursor {
                query.push((cursor_param.clone(), c.clone()));
            }
            query
        }
        Pager::Offset {
            offset_param,
            limit_param,
        } => vec![
            (offset_param.clone(), offset.to_string()),
            (limit_param.clone(), page_size.to_string()),
        ],
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::request::decode;

    fn lookup(query: &[(String, String)], key: &str) -> Option<String> {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn page<T>(items: Vec<T>, next_cursor: Option<&str>) -> Page<T> {
        Page {
            items,
            next_cursor: next_cursor.map(str::to_string),
            total: None,
        }
    }

    struct Recorder {
        seen: Vec<(u32, usize)>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder { seen: Vec::new() }
        }
    }

    impl Progress for Recorder {
        fn page_fetched(&mut self, pages: u32, items: usize) {
            self.seen.push((pages, items));
        }
    }

    /// 25 items served in pages of 10 → offsets 0, 10, 20 and page sizes
    /// 10, 10, 5, aggregated in server order.
    #[test]
    fn test_offset_mode_aggregates_all_pages_in_order() {
        let data: Vec<u32> = (0..25).collect();
        let mut offsets_requested = Vec::new();
        let mut progress = Recorder::new();

        let result: Vec<u32> = run_pager(
            &Pager::offset(),
            10,
            Some(1_000),
            &mut progress,
            |query| {
                let offset: usize = lookup(query, "offset").unwrap().parse().unwrap();
                let limit: usize = lookup(query, "limit").unwrap().parse().unwrap();
                offsets_requested.push(offset);
                let items = data.iter().cloned().skip(offset).take(limit).collect();
                Ok(page(items, None))
            },
        )
        .unwrap();

        assert_eq!(result, data);
        assert_eq!(offsets_requested, vec![0, 10, 20]);
        assert_eq!(progress.seen, vec![(1, 10), (2, 20), (3, 25)]);
    }

    #[test]
    fn test_offset_mode_stops_on_short_page() {
        let mut calls = 0;
        let result: Vec<u32> = run_pager(
            &Pager::offset(),
            10,
            Some(1_000),
            &mut NoProgress,
            |_query| {
                calls += 1;
                Ok(page(vec![1, 2, 3, 4, 5], None))
            },
        )
        .unwrap();

        assert_eq!(result, vec![1, 2, 3, 4, 5]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_empty_first_page_yields_empty_result() {
        for pager in &[Pager::default(), Pager::offset()] {
            let mut calls = 0;
            let result: Vec<u32> =
                run_pager(pager, 10, Some(1_000), &mut NoProgress, |_query| {
                    calls += 1;
                    Ok(page(Vec::new(), None))
                })
                .unwrap();
            assert!(result.is_empty());
            assert_eq!(calls, 1);
        }
    }

    #[test]
    fn test_cursor_mode_threads_the_cursor() {
        let mut cursors_requested = Vec::new();
        let result: Vec<u32> = run_pager(
            &Pager::default(),
            2,
            Some(1_000),
            &mut NoProgress,
            |query| {
                let cursor = lookup(query, "next");
                cursors_requested.push(cursor.clone());
                Ok(match cursor.as_deref() {
                    None => page(vec![1, 2], Some("c2")),
                    Some("c2") => page(vec![3, 4], Some("c3")),
                    Some("c3") => page(vec![5], None),
                    other => panic!("unexpected cursor {:?}", other),
                })
            },
        )
        .unwrap();

        assert_eq!(result, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            cursors_requested,
            vec![None, Some("c2".to_string()), Some("c3".to_string())]
        );
    }

    #[test]
    fn test_cursor_mode_stops_on_empty_page_despite_cursor() {
        let mut calls = 0;
        let result: Vec<u32> = run_pager(
            &Pager::default(),
            10,
            Some(1_000),
            &mut NoProgress,
            |_query| {
                calls += 1;
                Ok(page(Vec::new(), Some("more")))
            },
        )
        .unwrap();

        assert!(result.is_empty());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_limit_param_carries_the_page_size() {
        let _: Vec<u32> = run_pager(
            &Pager::default(),
            7,
            Some(1_000),
            &mut NoProgress,
            |query| {
                assert_eq!(lookup(query, "limit").as_deref(), Some("7"));
                Ok(page(vec![1], None))
            },
        )
        .unwrap();
    }

    /// A mid-pagination failure aborts the whole call; only fully fetched
    /// prior pages were ever visible, and only through the observer.
    #[test]
    fn test_error_on_later_page_aborts_the_call() {
        let mut calls = 0;
        let mut progress = Recorder::new();
        let err = run_pager::<u32, _>(
            &Pager::default(),
            10,
            Some(1_000),
            &mut progress,
            |_query| {
                calls += 1;
                if calls == 1 {
                    Ok(page((0..10).collect(), Some("c2")))
                } else {
                    Err(ErrorKind::Authentication { status: 401 }.into())
                }
            },
        )
        .unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::Authentication { status: 401 });
        assert_eq!(progress.seen, vec![(1, 10)]);
    }

    #[test]
    fn test_page_bound_stops_a_server_that_never_terminates() {
        let err = run_pager::<u32, _>(
            &Pager::default(),
            10,
            Some(3),
            &mut NoProgress,
            |_query| Ok(page((0..10).collect(), Some("again"))),
        )
        .unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::PaginationLimitExceeded { pages: 3 });
    }

    #[test]
    fn test_repeated_runs_agree() {
        let serve = |query: &[(String, String)]| {
            let offset: usize = lookup(query, "offset").unwrap().parse().unwrap();
            let items: Vec<u32> = (0..12).skip(offset).take(5).collect();
            Ok(page(items, None))
        };

        let first: Vec<u32> =
            run_pager(&Pager::offset(), 5, Some(1_000), &mut NoProgress, serve).unwrap();
        let second: Vec<u32> =
            run_pager(&Pager::offset(), 5, Some(1_000), &mut NoProgress, serve).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, (0..12).collect::<Vec<u32>>());
    }

    #[test]
    fn test_page_envelope_decodes() {
        let body = r#"{"items": [1, 2, 3], "nextCursor": "abc", "total": 9}"#;
        let page: Page<u32> = decode(body).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
        assert_eq!(page.total, Some(9));
    }

    #[test]
    fn test_last_page_has_no_cursor() {
        let body = r#"{"items": []}"#;
        let page: Page<u32> = decode(body).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_missing_items_array_is_malformed() {
        let err = decode::<Page<u32>>(r#"{"nextCursor": null}"#).unwrap_err();
        match err.kind() {
            ErrorKind::MalformedResponse(_) => {}
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }
}
