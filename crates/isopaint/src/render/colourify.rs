//! View-flag driven recolouring.

use crate::image::ImageId;
use crate::interaction::InteractionKind;
use crate::view::ViewFlags;

/// The image to draw for an entry of `kind` under `flags`.
///
/// Kinds that the active flags mark as see-through lose their recolour bits
/// and get the translucent highlight instead. Everything else is returned
/// unchanged.
pub fn colourify(image: ImageId, kind: InteractionKind, flags: ViewFlags) -> ImageId {
    if is_see_through(kind, flags) {
        image.see_through()
    } else {
        image
    }
}

fn is_see_through(kind: InteractionKind, flags: ViewFlags) -> bool {
    use InteractionKind as K;

    (flags.contains(ViewFlags::SEETHROUGH_RIDES) && kind == K::Ride)
        || (flags.contains(ViewFlags::UNDERGROUND_INSIDE) && kind == K::Wall)
        || (flags.contains(ViewFlags::SEETHROUGH_PATHS)
            && matches!(kind, K::Footpath | K::FootpathItem | K::Banner))
        || (flags.contains(ViewFlags::SEETHROUGH_SCENERY)
            && matches!(kind, K::Scenery | K::LargeScenery | K::Wall))
}
