use nalgebra::{point, Point3, Vector3};

use super::Ray;

/// Axis aligned box, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    /// Box of size `extent` centered on the origin
    pub fn centered(extent: Vector3<f32>) -> BoundBox {
        let half = extent * 0.5;
        BoundBox {
            lower: point![-half.x, -half.y, -half.z],
            upper: point![half.x, half.y, half.z],
        }
    }

    /// Returns `(t_near, t_far)` of the ray segment inside the box.
    /// `t_near` is negative when the ray starts inside.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        // Source: An Efficient and Robust Ray–Box Intersection Algorithm. Amy Williams et al. 2004.
        // http://citeseerx.ist.psu.edu/viewdoc/summary?doi=10.1.1.64.7663

        // t value of intersection with the 6 planes of a bounding box
        let t0 = (self.lower - ray.origin).component_div(&ray.direction);
        let t1 = (self.upper - ray.origin).component_div(&ray.direction);

        // [ (min,max) , (min,max) , (min,max) ]
        let t_minmax = t0.zip_map(&t1, |t0, t1| if t0 < t1 { (t0, t1) } else { (t1, t0) });

        let tmin = f32::max(f32::max(t_minmax.x.0, t_minmax.y.0), t_minmax.z.0);
        let tmax = f32::min(f32::min(t_minmax.x.1, t_minmax.y.1), t_minmax.z.1);

        // if tmax < 0, ray is intersecting AABB, but the whole AABB is behind us
        if tmax.is_sign_negative() {
            return None;
        }

        // if tmin > tmax, ray doesn't intersect AABB
        if tmin > tmax {
            return None;
        }

        Some((tmin, tmax))
    }
}

/// Iterates the 8 corners of a box
pub struct BoundBoxIterator {
    lower: Point3<f32>,
    upper: Point3<f32>,
    state: u8,
}

impl Iterator for BoundBoxIterator {
    type Item = Point3<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        let p = match self.state {
            0 => self.lower,
            1 => point![self.upper.x, self.lower.y, self.lower.z],
            2 => point![self.upper.x, self.upper.y, self.lower.z],
            3 => point![self.lower.x, self.upper.y, self.lower.z],
            4 => point![self.lower.x, self.lower.y, self.upper.z],
            5 => point![self.upper.x, self.lower.y, self.upper.z],
            6 => self.upper,
            7 => point![self.lower.x, self.upper.y, self.upper.z],
            _ => return None,
        };
        self.state += 1;
        Some(p)
    }
}

impl IntoIterator for BoundBox {
    type Item = Point3<f32>;

    type IntoIter = BoundBoxIterator;

    fn into_iter(self) -> Self::IntoIter {
        BoundBoxIterator {
            lower: self.lower,
            upper: self.upper,
            state: 0,
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    fn unit_box() -> BoundBox {
        BoundBox::centered(vector![2.0, 2.0, 2.0])
    }

    #[test]
    fn intersect_from_outside() {
        let ray = Ray::new(point![-5.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
        let (t0, t1) = unit_box().intersect(&ray).unwrap();
        assert!((t0 - 4.0).abs() < 1e-5);
        assert!((t1 - 6.0).abs() < 1e-5);
    }

    #[test]
    fn intersect_from_inside() {
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 1.0, 0.0]);
        let (t0, t1) = unit_box().intersect(&ray).unwrap();
        assert!(t0 < 0.0);
        assert!((t1 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn not_intersecting() {
        let ray = Ray::new(point![200.0, 200.0, 200.0], vector![1.0, 0.0, 0.0]);
        assert!(unit_box().intersect(&ray).is_none());

        // Box behind the ray
        let ray = Ray::new(point![5.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn corners() {
        let corners: Vec<_> = unit_box().into_iter().collect();
        assert_eq!(corners.len(), 8);
        assert!(corners.iter().all(|c| c.coords.abs() == vector![1.0, 1.0, 1.0]));
    }
}
