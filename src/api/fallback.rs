use super::{ApiError, ApiResult};
use std::collections::BTreeMap;
use std::future::Future;

/// Try `candidates` in order and return the first success with its index.
///
/// Every candidate is attempted at most once. When all of them fail, the
/// error of the last attempt is returned.
pub(crate) async fn first_success<C, T, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> ApiResult<(usize, T)>
where
    F: FnMut(C) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut last_err: Option<ApiError> = None;
    for (idx, candidate) in candidates.into_iter().enumerate() {
        match attempt(candidate).await {
            Ok(v) => return Ok((idx, v)),
            Err(e) => {
                tracing::debug!("candidate #{idx} failed: {e}");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(ApiError::no_candidates))
}

/// Backend operations whose route has moved between backend releases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum RouteFamily {
    PaymentScreenshot,
    CustomerBookings,
}

/// Which candidate route answered for each family in this session.
///
/// The first call of a family tries its candidates in order; later calls go straight
/// to the pinned route. A pinned route that starts answering 404/405 is
/// dropped and the family is negotiated again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RouteTable {
    pinned: BTreeMap<RouteFamily, usize>,
}

impl RouteTable {
    pub fn pinned(&self, family: RouteFamily) -> Option<usize> {
        self.pinned.get(&family).copied()
    }

    /// Overwrite one family's pin, leaving the others alone.
    pub fn pin(&mut self, family: RouteFamily, route: Option<usize>) {
        match route {
            Some(idx) => self.pinned.insert(family, idx),
            None => self.pinned.remove(&family),
        };
    }

    pub async fn resolve<C, T, F, Fut>(
        &mut self,
        family: RouteFamily,
        candidates: Vec<C>,
        mut attempt: F,
    ) -> ApiResult<T>
    where
        C: Clone,
        F: FnMut(C) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if let Some(idx) = self.pinned(family) {
            match candidates.get(idx).cloned() {
                Some(candidate) => match attempt(candidate).await {
                    Ok(v) => return Ok(v),
                    Err(e) if !e.is_route_missing() => return Err(e),
                    Err(e) => {
                        tracing::info!("{family:?} route #{idx} no longer answers ({e}), renegotiating");
                        self.pinned.remove(&family);
                    }
                },
                None => {
                    self.pinned.remove(&family);
                }
            }
        }

        let (idx, v) = first_success(candidates, &mut attempt).await?;
        tracing::debug!("{family:?} negotiated to route #{idx}");
        self.pinned.insert(family, idx);
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn not_found() -> ApiError {
        ApiError::http(404, "Cannot GET".to_string())
    }

    fn server_error() -> ApiError {
        ApiError::http(500, "boom".to_string())
    }

    /// Candidates are their own outcome: `Ok(n)` succeeds with `n`.
    fn run_first_success(outcomes: Vec<ApiResult<u32>>) -> (ApiResult<(usize, u32)>, usize) {
        let calls = RefCell::new(0usize);
        let out = block_on(first_success(outcomes, |o| {
            *calls.borrow_mut() += 1;
            async move { o }
        }));
        (out, calls.into_inner())
    }

    #[test]
    fn test_first_success_stops_after_first_ok() {
        let (out, calls) = run_first_success(vec![
            Err(not_found()),
            Err(not_found()),
            Ok(7),
            Ok(8),
        ]);
        assert_eq!(out.expect("third candidate succeeds"), (2, 7));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_first_success_first_candidate_wins() {
        let (out, calls) = run_first_success(vec![Ok(1), Err(not_found())]);
        assert_eq!(out.expect("first candidate succeeds"), (0, 1));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_first_success_surfaces_last_error() {
        let (out, calls) = run_first_success(vec![
            Err(ApiError::http(404, "first".to_string())),
            Err(ApiError::http(500, "last".to_string())),
        ]);
        let err = out.expect_err("all candidates fail");
        assert_eq!(err.message, "last");
        assert_eq!(err.status, Some(500));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_first_success_without_candidates() {
        let (out, calls) = run_first_success(vec![]);
        assert_eq!(out.expect_err("nothing to try").message, "Request failed");
        assert_eq!(calls, 0);
    }

    /// Route `i` answers from `routes[i]`; returns the result and which routes were hit.
    fn resolve_with(
        table: &mut RouteTable,
        routes: &[ApiResult<&'static str>],
    ) -> (ApiResult<&'static str>, Vec<usize>) {
        let hits = RefCell::new(Vec::new());
        let candidates: Vec<usize> = (0..routes.len()).collect();
        let out = block_on(table.resolve(RouteFamily::CustomerBookings, candidates, |i| {
            hits.borrow_mut().push(i);
            let r = routes[i].clone();
            async move { r }
        }));
        (out, hits.into_inner())
    }

    #[test]
    fn test_route_negotiated_once_then_pinned() {
        let mut table = RouteTable::default();
        let routes = [Err(not_found()), Ok("b"), Ok("c")];

        let (out, hits) = resolve_with(&mut table, &routes);
        assert_eq!(out.expect("second route answers"), "b");
        assert_eq!(hits, vec![0, 1]);
        assert_eq!(table.pinned(RouteFamily::CustomerBookings), Some(1));

        let (out, hits) = resolve_with(&mut table, &routes);
        assert_eq!(out.expect("pinned route answers"), "b");
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_pinned_route_error_is_not_renegotiated() {
        let mut table = RouteTable::default();
        let _ = resolve_with(&mut table, &[Ok("a"), Ok("b")]);

        let (out, hits) = resolve_with(&mut table, &[Err(server_error()), Ok("b")]);
        assert_eq!(out.expect_err("pinned route failed").status, Some(500));
        assert_eq!(hits, vec![0]);
        assert_eq!(table.pinned(RouteFamily::CustomerBookings), Some(0));
    }

    #[test]
    fn test_pinned_route_gone_triggers_renegotiation() {
        let mut table = RouteTable::default();
        let _ = resolve_with(&mut table, &[Ok("a"), Ok("b")]);

        let (out, hits) = resolve_with(&mut table, &[Err(not_found()), Ok("b")]);
        assert_eq!(out.expect("renegotiated route answers"), "b");
        assert_eq!(hits, vec![0, 0, 1]);
        assert_eq!(table.pinned(RouteFamily::CustomerBookings), Some(1));
    }

    #[test]
    fn test_failed_negotiation_pins_nothing() {
        let mut table = RouteTable::default();
        let (out, _) = resolve_with(&mut table, &[Err(not_found()), Err(not_found())]);
        assert!(out.is_err());
        assert_eq!(table.pinned(RouteFamily::CustomerBookings), None);
        assert_eq!(table.pinned(RouteFamily::PaymentScreenshot), None);
    }

    #[test]
    fn test_pin_touches_only_its_family() {
        let mut table = RouteTable::default();
        table.pin(RouteFamily::CustomerBookings, Some(2));
        table.pin(RouteFamily::PaymentScreenshot, Some(1));
        table.pin(RouteFamily::PaymentScreenshot, None);
        assert_eq!(table.pinned(RouteFamily::CustomerBookings), Some(2));
        assert_eq!(table.pinned(RouteFamily::PaymentScreenshot), None);
    }
}
