//! Shutdown signal handling

use std::fmt;
use std::io;

use tokio::sync::mpsc;

/// Why the session was asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "SIGINT"),
            Self::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Shutdown signal listener
///
/// Forwards OS shutdown signals onto a channel so the session loop can
/// `select!` on them next to its timers.
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<ShutdownReason>,
}

impl ShutdownSignal {
    /// Start listening for SIGINT and SIGTERM
    #[cfg(unix)]
    pub fn listen() -> Result<Self, io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (tx, rx) = mpsc::channel(4);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            while sigint.recv().await.is_some() {
                if tx_int.send(ShutdownReason::Interrupt).await.is_err() {
                    break;
                }
            }
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            while sigterm.recv().await.is_some() {
                if tx.send(ShutdownReason::Terminate).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self { receiver: rx })
    }

    /// Start listening for Ctrl+C
    #[cfg(not(unix))]
    pub fn listen() -> Result<Self, io::Error> {
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send(ShutdownReason::Interrupt).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self { receiver: rx })
    }

    /// Wait for the next shutdown request
    pub async fn recv(&mut self) -> Option<ShutdownReason> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_display() {
        assert_eq!(ShutdownReason::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownReason::Terminate.to_string(), "SIGTERM");
    }

    #[tokio::test]
    async fn listen_installs_handlers() {
        let signal = ShutdownSignal::listen();
        assert!(signal.is_ok());
    }
}
