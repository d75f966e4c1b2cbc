//! `## ...` stage lines on stdout while a fetch runs.

use service_loader_core::LoadEvent;
use service_loader_core::LoadObserver;
use std::io::Write;

pub struct ProgressPrinter<W: Write> {
    out: W,
    fetched_checksum: bool,
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fetched_checksum: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LoadObserver for ProgressPrinter<W> {
    fn on_event(&mut self, event: &LoadEvent<'_>) {
        // Progress output is best effort; a closed stdout must not abort the run.
        let _ = match event {
            LoadEvent::DownloadingArchive { bucket, key } => {
                writeln!(self.out, "## Downloading Archive: {}/{}", bucket, key)
            }
            LoadEvent::ArchiveDownloaded { .. } => {
                writeln!(self.out, "## Done\n\n## Generating Checksum")
            }
            LoadEvent::ChecksumComputed { .. } => writeln!(self.out, "## Done\n"),
            LoadEvent::DownloadingChecksum { bucket, key } => {
                self.fetched_checksum = true;
                writeln!(self.out, "## Downloading Checksum: {}/{}", bucket, key)
            }
            LoadEvent::UsingSuppliedChecksum => Ok(()),
            LoadEvent::ChecksumResolved { .. } => {
                if self.fetched_checksum {
                    writeln!(self.out, "## Done\n\n## Comparing checksums")
                } else {
                    writeln!(self.out, "## Comparing checksums")
                }
            }
            LoadEvent::Verified => writeln!(self.out, "## PASS\n"),
            LoadEvent::VerificationFailed { .. } => writeln!(self.out, "## FAIL\n"),
            LoadEvent::Saving { path } => {
                let name = path.file_name().unwrap_or(path.as_os_str());
                writeln!(self.out, "## Saving Archive to {}", name.to_string_lossy())
            }
            LoadEvent::Saved { .. } => writeln!(self.out, "## Done"),
        };
        let _ = self.out.flush();
    }
}
