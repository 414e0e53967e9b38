//! Template calibration.
//!
//! Pages rendered from one template put their article at the same place.
//! Calibration runs the full extraction over a sample of such pages and
//! keeps the most frequent signature, which can then be replayed cheaply
//! with [`decode`](crate::signature::decode) on every other page.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::dom::parse_html_bytes;
use crate::error::{Error, Result};
use crate::extractor::Extractor;
use crate::fetch::Fetch;
use crate::signature::Signature;

/// How often one signature was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct SignatureCount {
    pub signature: Signature,
    pub count: usize,
}

/// Winning signature plus the full tally, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct CalibrationReport {
    pub signature: Signature,
    pub samples: usize,
    pub tally: Vec<SignatureCount>,
}

/// Most frequent signature. Ties go to the one seen first.
///
/// Returns `None` for an empty input.
pub fn majority<I>(signatures: I) -> Option<CalibrationReport>
where
    I: IntoIterator<Item = Signature>,
{
    let mut index: HashMap<Signature, usize> = HashMap::new();
    let mut tally: Vec<SignatureCount> = Vec::new();
    let mut samples = 0;

    for signature in signatures {
        samples += 1;
        match index.get(&signature) {
            Some(&i) => tally[i].count += 1,
            None => {
                index.insert(signature.clone(), tally.len());
                tally.push(SignatureCount {
                    signature,
                    count: 1,
                });
            }
        }
    }

    let mut winner: Option<&SignatureCount> = None;
    for entry in &tally {
        if winner.is_none_or(|w| entry.count > w.count) {
            winner = Some(entry);
        }
    }
    let signature = winner?.signature.clone();

    Some(CalibrationReport {
        signature,
        samples,
        tally,
    })
}

/// Runs the extraction pipeline over a batch of locations.
pub struct Calibrator<'a> {
    extractor: &'a Extractor,
    fetcher: &'a dyn Fetch,
}

impl<'a> Calibrator<'a> {
    pub fn new(extractor: &'a Extractor, fetcher: &'a dyn Fetch) -> Self {
        Self { extractor, fetcher }
    }

    /// Winning signature of `locations`.
    pub fn calibrate<S: AsRef<str>>(&self, locations: &[S]) -> Result<Signature> {
        Ok(self.calibrate_report(locations)?.signature)
    }

    /// Calibrate and keep the tally.
    ///
    /// Locations are processed in order and the first fetch failure aborts
    /// the whole batch.
    pub fn calibrate_report<S: AsRef<str>>(&self, locations: &[S]) -> Result<CalibrationReport> {
        if locations.is_empty() {
            return Err(Error::NoUrls);
        }

        let mut signatures = Vec::with_capacity(locations.len());
        for location in locations {
            let location = location.as_ref();
            let bytes = self.fetcher.fetch(location)?;
            let doc = parse_html_bytes(&bytes);
            let signature = self.extractor.document_signature(&doc);
            debug!(location, %signature, "calibration sample");
            signatures.push(signature);
        }

        let report = majority(signatures).ok_or(Error::NoUrls)?;
        info!(
            signature = %report.signature,
            samples = report.samples,
            distinct = report.tally.len(),
            "calibrated template signature"
        );
        Ok(report)
    }
}
