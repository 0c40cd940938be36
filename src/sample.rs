//! Symbol samples read from raw binary data.
//!
//! One symbol is stored per byte. Each byte is masked to the configured
//! bit width, and the alphabet size is `2^bits`.

use std::path::Path;
use thiserror::Error;

/// Widest supported symbol, in bits.
pub const MAX_BITS_PER_SYMBOL: u8 = 8;

/// Errors that can occur while loading a sample.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sample contains no symbols")]
    Empty,
    #[error("bits per symbol must be 1-8, got {0}")]
    InvalidBitWidth(u8),
    #[error("failed to read sample file: {0}")]
    Io(#[from] std::io::Error),
}

/// An immutable sequence of symbols and the alphabet they are drawn from.
#[derive(Clone)]
pub struct SymbolSample {
    symbols: Vec<u8>,
    bits_per_symbol: u8,
}

impl SymbolSample {
    /// Creates a sample from raw bytes.
    ///
    /// With `bits_per_symbol` set, every byte is masked to that many low
    /// bits. Otherwise the width is the smallest one that holds the largest
    /// byte present.
    pub fn from_bytes(mut data: Vec<u8>, bits_per_symbol: Option<u8>) -> Result<Self, SampleError> {
        if data.is_empty() {
            return Err(SampleError::Empty);
        }

        let bits = match bits_per_symbol {
            Some(bits) => {
                if bits == 0 || bits > MAX_BITS_PER_SYMBOL {
                    return Err(SampleError::InvalidBitWidth(bits));
                }
                if bits < MAX_BITS_PER_SYMBOL {
                    let mask = (1u8 << bits) - 1;
                    data.iter_mut().for_each(|b| *b &= mask);
                }
                bits
            }
            None => {
                let max = data.iter().copied().max().unwrap_or(0);
                Self::bits_for(max)
            }
        };

        tracing::debug!(symbols = data.len(), bits, "Loaded sample");

        Ok(Self {
            symbols: data,
            bits_per_symbol: bits,
        })
    }

    /// Reads a sample file, keeping at most `max_symbols` symbols.
    pub fn from_file(
        path: impl AsRef<Path>,
        bits_per_symbol: Option<u8>,
        max_symbols: Option<usize>,
    ) -> Result<Self, SampleError> {
        let mut data = std::fs::read(path.as_ref())?;
        if let Some(max) = max_symbols {
            if data.len() > max {
                tracing::info!(
                    available = data.len(),
                    kept = max,
                    "Truncating sample"
                );
                data.truncate(max);
            }
        }
        Self::from_bytes(data, bits_per_symbol)
    }

    /// Smallest width (at least 1) that represents `max`.
    fn bits_for(max: u8) -> u8 {
        (u8::BITS - max.leading_zeros()).max(1) as u8
    }

    /// Returns the symbols.
    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Returns the number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol width in bits.
    #[inline]
    pub fn bits_per_symbol(&self) -> u8 {
        self.bits_per_symbol
    }

    /// Returns the number of possible symbol values.
    #[inline]
    pub fn alphabet_size(&self) -> u32 {
        1u32 << self.bits_per_symbol
    }
}

impl std::fmt::Debug for SymbolSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolSample")
            .field("symbols", &self.symbols.len())
            .field("bits_per_symbol", &self.bits_per_symbol)
            .finish()
    }
}
