//! The seam between the encode pipeline and a native codec backend.

use super::{EncodeConfig, EncodeError};
use crate::pixel::AdaptedImage;

/// Operations the pipeline needs from a codec backend.
///
/// Native handles are owned values: a `Picture` and a `Sink` release their
/// resources when dropped, so every exit path of the pipeline tears them
/// down exactly once.
pub trait Codec {
    /// Resolved native configuration.
    type Config;
    /// Native picture. May borrow the imported pixel planes for `'p`.
    type Picture<'p>;
    /// Native output buffer.
    type Sink;

    /// Resolve a validated configuration into the native form.
    fn configure(&self, config: &EncodeConfig) -> Result<Self::Config, EncodeError>;

    fn alloc_picture<'p>(&self) -> Result<Self::Picture<'p>, EncodeError>;

    fn alloc_sink(&self) -> Result<Self::Sink, EncodeError>;

    /// Import a canonical image into the picture.
    ///
    /// Implementations may reference the image planes instead of copying
    /// them, which is why the image must outlive the picture.
    fn import<'p>(
        &self,
        picture: &mut Self::Picture<'p>,
        image: &'p AdaptedImage<'_>,
    ) -> Result<(), EncodeError>;

    /// Current picture dimensions.
    fn dimensions(&self, picture: &Self::Picture<'_>) -> (u32, u32);

    /// Rescale the picture. A zero component is derived from the aspect ratio.
    fn rescale(
        &self,
        picture: &mut Self::Picture<'_>,
        width: u32,
        height: u32,
    ) -> Result<(), EncodeError>;

    /// Run the codec, appending the bitstream to `sink`.
    fn encode(
        &self,
        config: &mut Self::Config,
        picture: &mut Self::Picture<'_>,
        sink: &mut Self::Sink,
    ) -> Result<(), EncodeError>;

    /// Bytes accumulated in the sink.
    fn output<'s>(&self, sink: &'s Self::Sink) -> &'s [u8];
}
