//! Waypoint clean-up applied to raw search output

use bevy::math::IVec2;

/// True if `b` lies on the straight line through `a` and `c`
fn is_collinear(a: IVec2, b: IVec2, c: IVec2) -> bool {
    let (ax, ay) = (a.x as i64, a.y as i64);
    let (bx, by) = (b.x as i64, b.y as i64);
    let (cx, cy) = (c.x as i64, c.y as i64);
    (by - ay) * (cx - bx) == (cy - by) * (bx - ax)
}

/// Drop interior points that sit on a straight run between their neighbors.
/// The first and last points are always kept; paths of two or fewer points are unchanged.
pub fn simplify(path: &[IVec2]) -> Vec<IVec2> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let last = path.len() - 1;
    path.iter()
        .enumerate()
        .filter(|&(i, &point)| i == 0 || i == last || !is_collinear(path[i - 1], point, path[i + 1]))
        .map(|(_, &point)| point)
        .collect()
}

/// Drop the leading point: the cell the caller already occupies
pub fn trim_start(mut path: Vec<IVec2>) -> Vec<IVec2> {
    if !path.is_empty() {
        path.remove(0);
    }
    path
}
