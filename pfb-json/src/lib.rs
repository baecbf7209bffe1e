//! pfb-json contains the JSON schemas used to configure the souk-pfb
//! channelizer model and to report its results.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Channelizer design JSON schema.
///
/// This JSON schema describes the parameters of a polyphase filter bank
/// channelizer. All the fields are optional. Fields that are not specified take
/// the values of the hardware IP core (4096 channels, 8 taps per channel, 8
/// input lanes, 16 output lanes, 18-bit coefficients and datapath).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PfbDesign {
    /// Number of channels (FFT size).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u32>,
    /// Number of taps per channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taps: Option<u32>,
    /// Number of input lanes per clock tick.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_lanes: Option<u32>,
    /// Number of output lanes per clock tick.
    ///
    /// Each output channel uses two lanes (real and imaginary parts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_lanes: Option<u32>,
    /// Window applied to the prototype filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
    /// Width in bits of each component (real or imaginary) of the input samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_bits: Option<u8>,
    /// Width in bits of the FIR coefficients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coefficient_bits: Option<u8>,
    /// Width in bits of the FFT twiddle factors.
    ///
    /// Defaults to the width of the FIR coefficients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twiddle_bits: Option<u8>,
    /// Quantized prototype filter.
    ///
    /// The coefficients are given in time order as raw integers with
    /// `coefficient_bits` bits, `channels * taps` in total. If present, they
    /// are used instead of the windowed sinc designed with `window`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<Vec<i64>>,
    /// Width in bits of the FIR output and FFT datapath.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_bits: Option<u8>,
    /// Width in bits of each component of the output samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_bits: Option<u8>,
    /// FFT shift schedule word.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fft_shift: Option<u32>,
    /// Number of bits of the FFT shift schedule word used by each FFT stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_bits_per_stage: Option<u8>,
    /// Rounding used when reducing the width of a value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounding: Option<Rounding>,
    /// Behaviour on arithmetic overflow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_mode: Option<OverflowMode>,
    /// Type of the input samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_kind: Option<InputKind>,
    /// Handling of sync pulses that arrive while a run is in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resync_policy: Option<ResyncPolicy>,
}

/// Prototype filter window.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Window {
    /// Hann window.
    Hann,
    /// Hamming window.
    Hamming,
    /// Rectangular window (no windowing).
    Rectangular,
}

/// Rounding modes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rounding {
    /// Discard the LSBs (round towards minus infinity).
    Truncate,
    /// Round to nearest, with ties rounded towards plus infinity.
    Nearest,
}

/// Arithmetic overflow modes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OverflowMode {
    /// Clamp to the most positive or most negative representable value.
    Saturate,
    /// Keep the LSBs (two's complement wrap-around).
    Wrap,
}

/// Input sample types.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InputKind {
    /// Complex (IQ) input samples.
    Complex,
    /// Real input samples.
    ///
    /// The imaginary part of each input lane is ignored.
    Real,
}

/// Policy for sync pulses received while a run is in progress.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResyncPolicy {
    /// Restart the run, flushing the pipeline.
    Restart,
    /// Ignore the sync pulse.
    Ignore,
}

macro_rules! impl_str_conv {
    ($ty:ty, $($s:expr => $v:ident),*) => {
        impl std::str::FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, ()> {
                Ok(match s {
                    $(
                        $s => <$ty>::$v,
                    )*
                        _ => return Err(()),
                })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
                write!(f, "{}", match self {
                    $(
                        <$ty>::$v => $s,
                    )*
                })
            }
        }
    }
}

impl_str_conv!(Window,
               "hann" => Hann,
               "hamming" => Hamming,
               "rectangular" => Rectangular);

impl_str_conv!(Rounding,
               "truncate" => Truncate,
               "nearest" => Nearest);

impl_str_conv!(OverflowMode,
               "saturate" => Saturate,
               "wrap" => Wrap);

impl_str_conv!(InputKind,
               "complex" => Complex,
               "real" => Real);

impl_str_conv!(ResyncPolicy,
               "restart" => Restart,
               "ignore" => Ignore);

/// Frame/sync controller state.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SyncState {
    /// No sync pulse has been received. Input samples are discarded.
    Idle,
    /// A run has started and the pipeline is being filled.
    Flushing,
    /// Valid spectra are being produced.
    Steady,
}

impl_str_conv!(SyncState,
               "idle" => Idle,
               "flushing" => Flushing,
               "steady" => Steady);

/// IP core status JSON schema.
///
/// This contains a snapshot of the state of the channelizer IP core model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Status {
    /// Frame/sync controller state.
    pub state: SyncState,
    /// Number of clock ticks processed.
    pub ticks: u64,
    /// Number of spectra sent to the output.
    pub spectra: u64,
    /// Number of spectra in which an arithmetic overflow happened.
    pub overflow_count: u64,
    /// Number of sync pulses that violated the sync protocol.
    pub protocol_violations: u64,
    /// FFT shift schedule word.
    pub fft_shift: u32,
    /// Latency from sync to sync_out, in clock ticks.
    pub latency_ticks: u64,
}

/// Power of a channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChannelPower {
    /// Channel index.
    pub channel: u32,
    /// Integrated power in dB relative to full scale.
    pub power_db: f64,
}

/// Software versions JSON schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Versions {
    /// Git version of souk-pfb.
    pub souk_pfb_git: String,
    /// Version of souk-pfb.
    pub souk_pfb_version: String,
}

/// Tone sweep JSON schema.
///
/// This contains the response of a group of neighbouring channels to a test
/// tone swept across them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sweep {
    /// Channels whose response was measured.
    pub channels: Vec<u32>,
    /// Frequencies of the test tone, in units of channels.
    pub frequencies: Vec<f64>,
    /// Integrated power of each channel at each tone frequency, in dB
    /// relative to the largest power found in the sweep.
    ///
    /// Element `[i][j]` is the power of channel `channels[i]` with the tone
    /// at `frequencies[j]`.
    pub response_db: Vec<Vec<f64>>,
    /// Number of spectra in which an arithmetic overflow happened during the
    /// sweep.
    pub overflow_count: u64,
}

/// Simulation report JSON schema.
///
/// This is produced by the souk-pfb simulator after running a test tone
/// through the channelizer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    /// Design used for the simulation, with all the defaults filled in.
    pub design: PfbDesign,
    /// Frequency of the test tone, in units of channels.
    ///
    /// This is `None` when the input samples were read from a file.
    pub tone_channel: Option<f64>,
    /// Number of input frames.
    pub frames: u64,
    /// Number of integrated spectra.
    pub integrations: u64,
    /// Channel with the largest integrated power.
    pub peak_channel: u32,
    /// Integrated power of the channels around the peak.
    pub channels: Vec<ChannelPower>,
    /// Measured latency from the first sync to the first sync_out, in clock
    /// ticks. This is `None` when the simulation used the staged pipeline.
    pub measured_latency_ticks: Option<u64>,
    /// IP core status at the end of the simulation.
    pub status: Status,
    /// Tone sweep results, if a sweep was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<Sweep>,
    /// Software versions.
    pub versions: Versions,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn design_defaults() {
        let design: PfbDesign = serde_json::from_str("{}").unwrap();
        assert_eq!(design, PfbDesign::default());
        assert_eq!(serde_json::to_string(&design).unwrap(), "{}");
    }

    #[test]
    fn design_partial() {
        let design: PfbDesign =
            serde_json::from_str(r#"{"channels": 64, "window": "Hamming", "fft_shift": 4095}"#)
                .unwrap();
        assert_eq!(design.channels, Some(64));
        assert_eq!(design.window, Some(Window::Hamming));
        assert_eq!(design.fft_shift, Some(4095));
        assert_eq!(design.taps, None);
    }

    #[test]
    fn str_conv() {
        assert_eq!("restart".parse::<ResyncPolicy>(), Ok(ResyncPolicy::Restart));
        assert_eq!("wrap".parse::<OverflowMode>(), Ok(OverflowMode::Wrap));
        assert!("bogus".parse::<Window>().is_err());
        assert_eq!(SyncState::Flushing.to_string(), "flushing");
    }
}
