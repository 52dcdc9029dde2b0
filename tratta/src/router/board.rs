use tratta_core::{BoardRequest, Capability, FlightBoard, TrattaError};

use crate::Tratta;

impl Tratta {
    /// Fetch the scheduled flights at an airport for a UTC window.
    ///
    /// Behavior and trade-offs:
    /// - Windows wider than a provider's `max_board_window` are split into
    ///   consecutive chunks fetched concurrently against that provider, then
    ///   merged and deduplicated. Callers never need to chunk by hand.
    /// - The per-provider timeout bounds the whole chunk fan-out for a
    ///   connector, not each chunk individually; the builder's request
    ///   timeout, when set, bounds the fetch across all providers.
    /// - A failing chunk fails the connector, which triggers fallback to the
    ///   next provider under `PriorityWithFallback`.
    ///
    /// # Errors
    /// Returns an error if no eligible provider succeeds or none support the capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tratta::router",
            skip(self, req),
            fields(airport = %req.airport, direction = ?req.direction),
        )
    )]
    pub async fn board(&self, req: &BoardRequest) -> Result<FlightBoard, TrattaError> {
        let airport = req.airport.clone();
        let fetch = self.fetch_single(
            Some(&airport),
            Capability::Board,
            format!("board for {}", req.airport),
            move |c| {
                c.as_board_provider()?;
                let req2 = req.clone();
                Some(async move {
                    let Some(p) = c.as_board_provider() else {
                        return Err(TrattaError::connector(
                            c.name(),
                            "missing board capability during call",
                        ));
                    };
                    let chunks = tratta_core::split_window(&req2, p.max_board_window())?;
                    let fetched =
                        futures::future::join_all(chunks.iter().map(|chunk| p.board(chunk))).await;
                    let mut boards = Vec::with_capacity(fetched.len());
                    for res in fetched {
                        boards.push(res?);
                    }
                    Ok(tratta_core::merge_boards(boards))
                })
            },
        );
        crate::core::with_request_deadline(self.cfg.request_timeout, fetch)
            .await
            .map_err(|_| TrattaError::request_timeout("board"))?
    }
}
