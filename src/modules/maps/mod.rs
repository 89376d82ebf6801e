mod coordinate_resolver;

pub use coordinate_resolver::{
    extract_coordinates, is_google_maps_url, Coordinates, CoordinateResolver, MapsError,
};
