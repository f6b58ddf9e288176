//! Resource groups: crimes, forces, neighbourhoods, stop and search.
//!
//! Each group is a borrowed view over the client's shared [`Dispatcher`].
//! For every endpoint there is a `build_*` method producing the
//! [`HttpRequest`](crate::http::HttpRequest) and a same-named method without
//! the prefix that dispatches it.

mod crimes;
mod forces;
mod neighbourhoods;
mod stop_search;

pub use crimes::Crimes;
pub use forces::Forces;
pub use neighbourhoods::Neighbourhoods;
pub use stop_search::StopSearch;

use crate::date::{normalize, DateInput};
use crate::error::ApiError;
use crate::query::QueryParams;

/// Normalise and append `date`, or leave the key out entirely.
pub(crate) fn push_date(params: &mut QueryParams, date: Option<DateInput>) -> Result<(), ApiError> {
    let token = date.map(normalize).transpose()?;
    params.push_opt("date", token);
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::dispatch::Dispatcher;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse, Transport};

    pub const BASE_URL: &str = "https://data.police.uk/api";

    /// Fails the test if a request builder reaches the network.
    struct NoNetwork;

    impl Transport for NoNetwork {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            panic!("unexpected network call to {}", request.full_url());
        }
    }

    pub fn dispatcher() -> Dispatcher {
        Dispatcher::new(BASE_URL, Arc::new(NoNetwork))
    }

    /// Path and query relative to the base URL.
    pub fn relative(request: &HttpRequest) -> String {
        request
            .full_url()
            .strip_prefix(BASE_URL)
            .map(str::to_string)
            .unwrap_or_else(|| request.full_url())
    }
}
