//! Optional score reduction of border frames into compact summaries

use crate::analysis::descriptors::{CHANNELS, EdgeDescriptor};
use crate::io::configuration::DEFAULT_PAIR_OFFSETS;
use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array2, ArrayView1};

/// Reduces one channel column of a border to a fixed-size summary
pub type ChannelReducer = fn(ArrayView1<'_, u16>) -> Vec<u16>;

/// How raw border frames become comparable descriptors
///
/// All descriptors compared against each other must come from the same
/// reduction; lengths differ between modes.
#[derive(Clone, Debug, Default)]
pub enum ScoreReduction {
    /// Keep one sample per border pixel
    #[default]
    Raw,
    /// Sum symmetric sample pairs `v[i] + v[n - 1 - i]` for each offset
    SymmetricPairs {
        /// Offsets measured from both ends of the border
        offsets: Vec<usize>,
    },
    /// Apply a caller-supplied reducer to every channel column
    Custom(ChannelReducer),
}

impl ScoreReduction {
    /// Symmetric pair reduction with the default offsets
    pub fn symmetric_pairs() -> Self {
        Self::SymmetricPairs {
            offsets: DEFAULT_PAIR_OFFSETS.to_vec(),
        }
    }

    /// Whether descriptors are summaries rather than raw pixels
    ///
    /// Reduced descriptors cannot tell reading directions apart, so the
    /// driver falls back to raw frames to pick one.
    pub const fn is_reduced(&self) -> bool {
        !matches!(self, Self::Raw)
    }

    /// Check the reduction against a border length
    ///
    /// # Errors
    ///
    /// Returns an error if a pair offset falls outside the border
    pub fn validate(&self, side_length: usize) -> Result<()> {
        if let Self::SymmetricPairs { offsets } = self {
            if offsets.is_empty() {
                return Err(invalid_parameter(
                    "offsets",
                    &"[]",
                    &"symmetric pair reduction needs at least one offset",
                ));
            }
            if let Some(&offset) = offsets.iter().find(|&&offset| offset >= side_length) {
                return Err(invalid_parameter(
                    "offsets",
                    &offset,
                    &format!("offset must be below the border length {side_length}"),
                ));
            }
        }
        Ok(())
    }

    /// Reduce a raw border frame
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A pair offset falls outside the frame
    /// - A custom reducer returns columns of different lengths
    pub fn reduce(&self, frame: &EdgeDescriptor) -> Result<EdgeDescriptor> {
        match self {
            Self::Raw => Ok(frame.clone()),
            Self::SymmetricPairs { offsets } => {
                self.validate(frame.len())?;
                reduce_columns(frame, |column| symmetric_pair_sums(column, offsets))
            }
            Self::Custom(reducer) => reduce_columns(frame, |column| reducer(column)),
        }
    }
}

/// Pair sums of one channel column; offsets outside the column are skipped
pub fn symmetric_pair_sums(column: ArrayView1<'_, u16>, offsets: &[usize]) -> Vec<u16> {
    let last = column.len().saturating_sub(1);
    offsets
        .iter()
        .filter_map(|&offset| {
            let head = column.get(offset)?;
            let tail = column.get(last.checked_sub(offset)?)?;
            Some(head.saturating_add(*tail))
        })
        .collect()
}

fn reduce_columns<F>(frame: &EdgeDescriptor, mut reducer: F) -> Result<EdgeDescriptor>
where
    F: FnMut(ArrayView1<'_, u16>) -> Vec<u16>,
{
    let samples = frame.samples();
    let columns: Vec<Vec<u16>> = samples.columns().into_iter().map(&mut reducer).collect();

    let length = columns.first().map_or(0, Vec::len);
    if columns.iter().any(|column| column.len() != length) {
        return Err(invalid_parameter(
            "reduction",
            &format!("{:?}", columns.iter().map(Vec::len).collect::<Vec<_>>()),
            &"every channel must reduce to the same length",
        ));
    }

    let mut reduced = Array2::zeros((length, CHANNELS));
    for (mut target, values) in reduced.columns_mut().into_iter().zip(&columns) {
        for (dst, &src) in target.iter_mut().zip(values) {
            *dst = src;
        }
    }
    EdgeDescriptor::from_samples(reduced)
}
