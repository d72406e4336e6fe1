use crate::domain::VictoryNotice;

/// Receives a notice when the player wins a match.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_victory(&mut self, notice: VictoryNotice) -> anyhow::Result<()>;
}

/// Notifier that writes the notice to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify_victory(&mut self, notice: VictoryNotice) -> anyhow::Result<()> {
        log::info!(
            "victory notice for {}: won with {} points in {} moves",
            notice.recipient,
            notice.winner_score,
            notice.total_moves
        );
        Ok(())
    }
}
