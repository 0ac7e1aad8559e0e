mod atlas;
mod equality;
mod extents;
mod length;
mod point_on_path;
mod slope;

pub use atlas::Atlas;
pub use equality::{
    is_angle_equal, is_arc_overlapping, is_line_overlapping, is_path_equal, is_point_equal,
    point_distance,
};
pub use extents::{model_extents, path_extents, path_extents_at, Extents};
pub use length::{model_path_length, path_length};
pub use point_on_path::{is_between_arc_angles, is_between_points, is_point_on_path, path_distance};
pub use slope::{is_slope_equal, is_slope_parallel, line_slope, slope_intersection_point, Slope};
