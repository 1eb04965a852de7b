//! One user's forecasting session.
//!
//! Ties the request builder, a forecasting service and the forecast slot
//! together. A refresh either publishes a complete new snapshot or leaves
//! the slot exactly as it was.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::error::ForecastError;
use crate::models::RawAmount;
use crate::request_builder;
use crate::service::ForecastService;
use crate::slot::{ForecastSlot, SharedSnapshot};
use crate::snapshot::ForecastSnapshot;

/// What to do when responses arrive out of dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrivalPolicy {
    /// The last response to arrive is displayed, whatever its age.
    #[default]
    LastArrivalWins,
    /// A response older than the displayed one is dropped.
    DiscardStale,
}

pub struct ForecastSession {
    service: Box<dyn ForecastService>,
    slot: ForecastSlot,
    next_sequence: AtomicU64,
    policy: ArrivalPolicy,
}

impl ForecastSession {
    pub fn new(service: Box<dyn ForecastService>) -> Self {
        Self::with_policy(service, ArrivalPolicy::default())
    }

    pub fn with_policy(
        service: Box<dyn ForecastService>,
        policy: ArrivalPolicy,
    ) -> Self {
        Self {
            service,
            slot: ForecastSlot::new(),
            next_sequence: AtomicU64::new(1),
            policy,
        }
    }

    pub fn current(&self) -> Option<SharedSnapshot> {
        self.slot.current()
    }

    /// Validates input, fetches a forecast and publishes it.
    ///
    /// Returns the snapshot built from this call's response. Under
    /// [`ArrivalPolicy::DiscardStale`] that snapshot may not be the one the
    /// slot ends up holding.
    ///
    /// # Errors
    /// * [`ForecastError::InvalidInput`]: nothing was dispatched.
    /// * [`ForecastError::Transport`]: the service call failed.
    /// * [`ForecastError::MalformedResponse`]: the series disagree in length.
    ///
    /// In every error case the slot is untouched.
    pub async fn refresh<'a, I>(
        &self,
        raw_salary: &RawAmount,
        raw_expenses: I,
    ) -> Result<SharedSnapshot, ForecastError>
    where
        I: IntoIterator<Item = (&'a str, &'a RawAmount)>,
    {
        let request = request_builder::build(raw_salary, raw_expenses)?;
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);

        debug!(
            sequence,
            service = self.service.name(),
            salary = %request.salary,
            categories = request.expenses.len(),
            "dispatching forecast request"
        );
        let response = self.service.forecast(&request).await.map_err(|err| {
            warn!(sequence, error = %err, "forecast request failed");
            ForecastError::from(err)
        })?;

        if let Err(err) = response.validate() {
            warn!(sequence, error = %err, "rejecting malformed forecast");
            return Err(err.into());
        }

        let snapshot = Arc::new(ForecastSnapshot {
            sequence,
            request,
            response,
        });
        match self.policy {
            ArrivalPolicy::LastArrivalWins => self.slot.publish(snapshot.clone()),
            ArrivalPolicy::DiscardStale => {
                self.slot.publish_if_newer(snapshot.clone());
            }
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::analysis::GoalTargets;
    use crate::models::{ForecastRequest, ForecastResponse, SavingsSummary, ScenarioSeries};
    use crate::service::ServiceError;

    /// Projects `months` of flat savings; can be told to fail, to return
    /// ragged series, or to stall longer for smaller salaries.
    #[derive(Default)]
    struct StubService {
        fail: bool,
        ragged: bool,
        stall_small_salaries: bool,
        calls: Mutex<Vec<Decimal>>,
    }

    #[async_trait]
    impl ForecastService for StubService {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn forecast(
            &self,
            request: &ForecastRequest,
        ) -> Result<ForecastResponse, ServiceError> {
            self.calls.lock().unwrap().push(request.salary);
            if self.stall_small_salaries && request.salary < dec!(2000) {
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            if self.fail {
                return Err(ServiceError::Transport("connection refused".to_string()));
            }

            let surplus = request.monthly_surplus().unwrap();
            let series: Vec<Decimal> = (1..=3).map(|m| surplus * Decimal::from(m)).collect();
            let mut conservative = series.clone();
            if self.ragged {
                conservative.pop();
            }
            Ok(ForecastResponse {
                summary: SavingsSummary {
                    monthly: surplus,
                    yearly: surplus * dec!(12),
                    two_years: surplus * dec!(24),
                    five_years: surplus * dec!(60),
                },
                scenarios: ScenarioSeries {
                    base: series.clone(),
                    optimistic: series,
                    conservative,
                },
                recommendation: format!("salary {}", request.salary),
            })
        }
    }

    fn expenses() -> Vec<(&'static str, RawAmount)> {
        vec![("rent", 1000.0.into()), ("food", 500.0.into())]
    }

    async fn refresh(
        session: &ForecastSession,
        salary: RawAmount,
    ) -> Result<SharedSnapshot, ForecastError> {
        let entries = expenses();
        session
            .refresh(&salary, entries.iter().map(|(c, r)| (*c, r)))
            .await
    }

    #[tokio::test]
    async fn refresh_publishes_snapshot() {
        let session = ForecastSession::new(Box::new(StubService::default()));

        let snapshot = refresh(&session, 3000.0.into()).await.unwrap();

        assert_eq!(snapshot.sequence, 1);
        assert_eq!(snapshot.response.summary.monthly, dec!(1500));
        assert_eq!(session.current().unwrap(), snapshot);
        assert_eq!(
            snapshot.goals_with(&GoalTargets::uniform(dec!(3000))).base,
            Some(2)
        );
    }

    #[tokio::test]
    async fn invalid_input_is_not_dispatched_and_keeps_prior_forecast() {
        let stub = StubService::default();
        let session = ForecastSession::new(Box::new(stub));
        let before = refresh(&session, 3000.0.into()).await.unwrap();

        let err = refresh(&session, (-1.0).into()).await.unwrap_err();

        assert!(matches!(err, ForecastError::InvalidInput(_)));
        assert_eq!(session.current().unwrap(), before);
    }

    #[tokio::test]
    async fn invalid_input_makes_no_service_call() {
        let stub = Arc::new(StubService::default());
        let session = ForecastSession::new(Box::new(SharedStub(stub.clone())));

        let _ = refresh(&session, "not a number".into()).await;

        assert!(stub.calls.lock().unwrap().is_empty());
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn transport_failure_keeps_slot_empty() {
        let session = ForecastSession::new(Box::new(StubService {
            fail: true,
            ..StubService::default()
        }));

        let err = refresh(&session, 3000.0.into()).await.unwrap_err();

        assert!(matches!(err, ForecastError::Transport(ServiceError::Transport(_))));
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn malformed_response_is_not_published() {
        let session = ForecastSession::new(Box::new(StubService {
            ragged: true,
            ..StubService::default()
        }));

        let err = refresh(&session, 3000.0.into()).await.unwrap_err();

        assert!(matches!(err, ForecastError::MalformedResponse(_)));
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn overlapping_refreshes_leave_one_whole_response() {
        let session = ForecastSession::new(Box::new(StubService {
            stall_small_salaries: true,
            ..StubService::default()
        }));

        // The first request stalls, so its response lands last.
        let (slow, fast) = tokio::join!(
            refresh(&session, 1800.0.into()),
            refresh(&session, 4000.0.into())
        );
        let (slow, fast) = (slow.unwrap(), fast.unwrap());

        let current = session.current().unwrap();
        assert_eq!(current, slow);
        assert_eq!(current.request.salary, dec!(1800));
        assert_eq!(current.response.summary.monthly, dec!(300));
        assert_eq!(current.response.recommendation, "salary 1800");
        assert!(current.sequence < fast.sequence);
    }

    #[tokio::test]
    async fn discard_stale_keeps_newest_dispatch() {
        let session = ForecastSession::with_policy(
            Box::new(StubService {
                stall_small_salaries: true,
                ..StubService::default()
            }),
            ArrivalPolicy::DiscardStale,
        );

        let (slow, fast) = tokio::join!(
            refresh(&session, 1800.0.into()),
            refresh(&session, 4000.0.into())
        );
        let (_slow, fast) = (slow.unwrap(), fast.unwrap());

        let current = session.current().unwrap();
        assert_eq!(current, fast);
        assert_eq!(current.response.recommendation, "salary 4000");
    }

    struct SharedStub(Arc<StubService>);

    #[async_trait]
    impl ForecastService for SharedStub {
        fn name(&self) -> &'static str {
            self.0.name()
        }

        async fn forecast(
            &self,
            request: &ForecastRequest,
        ) -> Result<ForecastResponse, ServiceError> {
            self.0.forecast(request).await
        }
    }
}
