use crate::{
    approx_eq::EPSILON,
    math::{point::Point, vector::Vector},
    render::ray::Ray,
    scene::{
        World,
        object::{Object, ObjectId, material::AIR_REFRACTIVE_INDEX},
    },
};

/// Sink the shape algorithms push intersection times into.
#[derive(Debug, Default, Clone)]
pub struct IntersectionCollector {
    times: Vec<f64>,
}

impl IntersectionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, time: f64) {
        self.times.push(time);
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn into_times(self) -> Vec<f64> {
        self.times
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    time: f64,
    object: &'a Object,
}

impl<'a> Intersection<'a> {
    pub fn new(time: f64, object: &'a Object) -> Self {
        Self { time, object }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }
}

/// Intersections of one ray, sorted by ascending time.
#[derive(Debug, Clone)]
pub struct IntersectionCollection<'a> {
    ray: Ray,
    vec: Vec<Intersection<'a>>,
}

impl<'a> IntersectionCollection<'a> {
    pub fn new(ray: Ray, mut vec: Vec<Intersection<'a>>) -> Self {
        vec.sort_by(|i1, i2| i1.time().total_cmp(&i2.time()));
        Self { ray, vec }
    }

    pub fn from_times_and_obj(ray: Ray, times: Vec<f64>, object: &'a Object) -> Self {
        Self::new(
            ray,
            times
                .into_iter()
                .map(|time| Intersection::new(time, object))
                .collect(),
        )
    }

    pub fn from_ray_and_obj(ray: Ray, object: &'a Object) -> Self {
        Self::from_times_and_obj(ray, object.intersection_times(&ray), object)
    }

    pub fn from_ray_and_mult_objects(
        ray: Ray,
        objects: impl IntoIterator<Item = &'a Object>,
    ) -> Self {
        let mut collector = IntersectionCollector::new();
        let mut intersections = Vec::new();

        for object in objects {
            object.intersect(&ray, &mut collector);
            intersections.extend(
                collector
                    .times
                    .drain(..)
                    .map(|time| Intersection::new(time, object)),
            );
        }

        Self::new(ray, intersections)
    }

    /// Brute force intersection against every object of the world.
    pub fn from_world(ray: Ray, world: &'a World) -> Self {
        Self::from_ray_and_mult_objects(ray, world.objects())
    }

    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    pub fn vec(&self) -> &[Intersection<'a>] {
        &self.vec
    }

    pub fn count(&self) -> usize {
        self.vec.len()
    }

    pub fn times_vec(&self) -> Vec<f64> {
        self.vec.iter().map(|inter| inter.time()).collect()
    }

    fn hit_index(&self) -> Option<usize> {
        self.vec.iter().position(|inter| inter.time() > 0.)
    }

    /// Nearest intersection in front of the ray origin.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.hit_index().map(|index| &self.vec[index])
    }

    pub fn hit_computations(&self, world: &World) -> Option<IntersecComputations<'a>> {
        self.computations_at_id(self.hit_index()?, world)
    }

    /// Shading state of the intersection at `index`.
    /// Refractive indices come from the containment stack built while walking the sorted intersections.
    pub fn computations_at_id(
        &self,
        index: usize,
        world: &World,
    ) -> Option<IntersecComputations<'a>> {
        let hit = self.vec.get(index)?;

        let refractive_index_of_last = |containers: &[&Object]| {
            containers.last().map_or(AIR_REFRACTIVE_INDEX, |object| {
                world.material_of(object).refractive_index
            })
        };

        let mut containers: Vec<&Object> = Vec::new();
        let mut refractive_from = AIR_REFRACTIVE_INDEX;
        let mut refractive_to = AIR_REFRACTIVE_INDEX;

        for (i, inter) in self.vec.iter().enumerate() {
            if i == index {
                refractive_from = refractive_index_of_last(&containers);
            }

            let id: ObjectId = inter.object().id();
            match containers.iter().position(|object| object.id() == id) {
                Some(position) => {
                    containers.remove(position);
                }
                None => containers.push(inter.object()),
            }

            if i == index {
                refractive_to = refractive_index_of_last(&containers);
                break;
            }
        }

        Some(IntersecComputations::new(
            hit.time(),
            hit.object(),
            &self.ray,
            refractive_from,
            refractive_to,
        ))
    }
}

/// Everything the shading needs to know about a single intersection.
#[derive(Debug, Clone)]
pub struct IntersecComputations<'a> {
    time: f64,
    object: &'a Object,
    point: Point,
    over_point: Point,
    under_point: Point,
    eye_v: Vector,
    normal_v: Vector,
    reflect_v: Vector,
    inside_obj: bool,
    refractive_from: f64,
    refractive_to: f64,
}

impl<'a> IntersecComputations<'a> {
    pub fn new(
        time: f64,
        object: &'a Object,
        ray: &Ray,
        refractive_from: f64,
        refractive_to: f64,
    ) -> Self {
        let point = ray.position(time);
        let eye_v = -*ray.direction();
        let mut normal_v = object.normal_vector_at(point);

        let inside_obj = normal_v.dot(eye_v) < 0.;
        if inside_obj {
            normal_v = -normal_v;
        }

        let reflect_v = ray.direction().reflect(normal_v);
        let over_point = point + normal_v * EPSILON;
        let under_point = point - normal_v * EPSILON;

        Self {
            time,
            object,
            point,
            over_point,
            under_point,
            eye_v,
            normal_v,
            reflect_v,
            inside_obj,
            refractive_from,
            refractive_to,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }
    pub fn object(&self) -> &'a Object {
        self.object
    }
    pub fn point(&self) -> Point {
        self.point
    }
    pub fn over_point(&self) -> Point {
        self.over_point
    }
    pub fn under_point(&self) -> Point {
        self.under_point
    }
    pub fn eye_v(&self) -> Vector {
        self.eye_v
    }
    pub fn normal_v(&self) -> Vector {
        self.normal_v
    }
    pub fn reflect_v(&self) -> Vector {
        self.reflect_v
    }
    pub fn inside_obj(&self) -> bool {
        self.inside_obj
    }
    /// n1, index of the medium the ray leaves
    pub fn refractive_from(&self) -> f64 {
        self.refractive_from
    }
    /// n2, index of the medium the ray enters
    pub fn refractive_to(&self) -> f64 {
        self.refractive_to
    }
}
