use super::traits::Notifier;

/// Notifier that writes user-facing messages to the `tracing` log.
/// Used when the embedding UI has no toast surface of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "shop_cart_core::notify", "{message}");
    }
}
