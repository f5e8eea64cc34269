pub mod mailer;

use std::sync::Arc;

use tracing::{info, warn};

pub use mailer::{LogMailer, Mailer, WebhookMailer};

pub const WELCOME_SUBJECT: &str = "Bem-vindo(a)!";

pub fn welcome_body(name: &str) -> String {
    format!("Olá {name}, bem-vindo(a) ao EcoTrack!")
}

/// Sends the welcome mail in the background. Failures are logged and never
/// reach the caller.
pub fn send_welcome(mailer: Arc<dyn Mailer>, to: String, name: String) {
    tokio::spawn(async move {
        let body = welcome_body(&name);
        match mailer.send(&to, WELCOME_SUBJECT, &body).await {
            Ok(()) => info!(%to, "welcome email sent"),
            Err(e) => warn!(error = %e, %to, "welcome email failed"),
        }
    });
}


#[cfg(test)]
mod tests {
    use super::{testing::RecordingMailer, *};
    use std::time::Duration;

    #[test]
    fn welcome_template_uses_name() {
        assert_eq!(welcome_body("Ana"), "Olá Ana, bem-vindo(a) ao EcoTrack!");
    }

    #[tokio::test]
    async fn welcome_is_sent_in_background() {
        let (mailer, mut rx) = RecordingMailer::new(false);
        send_welcome(Arc::new(mailer), "ana@example.com".into(), "Ana".into());
        let mail = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mail.to, "ana@example.com");
        assert_eq!(mail.subject, WELCOME_SUBJECT);
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        LogMailer.send("a@example.com", "s", "b").await.unwrap();
    }
}
