use crate::error::StepError;
use crate::utils::Interrupt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};

/// Pulls a remote resource into a writer, returning the bytes written
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> Result<u64, StepError>;
}

/// Blocking HTTPS download via ureq with an indicatif progress bar
pub struct HttpFetcher {
    show_progress: bool,
    interrupt: Interrupt,
}

impl HttpFetcher {
    pub fn new(show_progress: bool, interrupt: Interrupt) -> Self {
        Self {
            show_progress,
            interrupt,
        }
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::with_template(
                        "  {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template("  {spinner} {bytes} downloaded")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        }
    }
}

fn network_error(url: &str, reason: impl ToString) -> StepError {
    StepError::Network {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> Result<u64, StepError> {
        log::debug!("Downloading {}", url);

        let response = ureq::get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => network_error(url, format!("HTTP {}", code)),
            ureq::Error::Transport(t) => network_error(url, t),
        })?;

        let total: Option<u64> = response
            .header("content-length")
            .and_then(|s| s.parse().ok());
        let pb = self.progress_bar(total);

        let mut reader = response.into_reader();
        let mut buffer = [0u8; 8192];
        let mut written = 0u64;

        loop {
            if self.interrupt.is_set() {
                pb.abandon();
                return Err(StepError::Interrupted);
            }

            let n = reader.read(&mut buffer).map_err(|e| network_error(url, e))?;
            if n == 0 {
                break;
            }

            dest.write_all(&buffer[..n])?;
            written += n as u64;
            pb.set_position(written);
        }

        dest.flush()?;
        pb.finish_and_clear();

        log::debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }
}
