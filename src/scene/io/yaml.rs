use std::{cell::RefCell, collections::HashMap, path::Path};

use derive_builder::Builder;
use saphyr::Yaml;
use thiserror::Error;

use crate::{
    error::Result,
    math::{
        color::Color,
        matrix::Matrix,
        point::Point,
        transform::Transform,
        tuple::{Axis, Tuple},
        vector::Vector,
    },
    scene::{
        World,
        camera::Camera,
        light::point_light::PointLightSource,
        object::{
            Object,
            material::{Material, MaterialId, MaterialRef, pattern::Pattern},
            primitive::{cone::Cone, cylinder::Cylinder, shape::Shape},
        },
    },
};

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("invalid yaml: {0}")]
    YamlSyntax(String),
    #[error("a scene file holds exactly one yaml document")]
    MultipleDocuments,
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("invalid value of `{0}`")]
    InvalidField(String),
    #[error("unknown define `{0}`")]
    UnknownDefine(String),
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
    /// Top level entries must be maps like `- add: sphere` or `- define: NAME`.
    #[error("unexpected scene entry")]
    UnexpectedValue,
}

#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(derive(Debug))]
/// Camera options gathered from the scene file.
/// Every value can still be overridden through the builder, e.g. from the command line.
pub struct CameraSettings {
    #[builder(default = "CameraSettings::DEFAULT_WIDTH")]
    pub target_width: usize,
    #[builder(default = "CameraSettings::DEFAULT_HEIGHT")]
    pub target_height: usize,
    #[builder(default = "CameraSettings::DEFAULT_FOV")]
    pub field_of_view: f64,
    #[builder(default = "Matrix::identity()")]
    pub view_transformation: Matrix,
}

impl CameraSettings {
    pub const DEFAULT_WIDTH: usize = 800;
    pub const DEFAULT_HEIGHT: usize = 800;
    pub const DEFAULT_FOV: f64 = std::f64::consts::FRAC_PI_3;

    pub fn camera(&self) -> Result<Camera> {
        Camera::with_transformation(
            self.target_width,
            self.target_height,
            self.field_of_view,
            self.view_transformation,
        )
    }
}

#[derive(Debug)]
/// The output of the parser. Camera settings stay a builder,
/// because the cli options can override the values in the yaml file.
pub struct YamlSceneConfig {
    pub world: World,
    pub camera_settings: CameraSettingsBuilder,
    pub max_recursive_depth: Option<usize>,
}

impl YamlSceneConfig {
    pub fn camera(&self) -> Result<Camera> {
        self.camera_settings
            .build()
            .map_err(|err| SceneError::InvalidField(err.to_string()))?
            .camera()
    }
}

const PREDEFINED_DEFINES: &str = r#"
- define: PI
  value: 3.141592653589793
- define: 2_PI
  value: 6.283185307179586
- define: FRAC_PI_2
  value: 1.5707963267948966
- define: FRAC_PI_3
  value: 1.0471975511965979
- define: FRAC_PI_4
  value: 0.7853981633974483
- define: FRAC_PI_6
  value: 0.5235987755982989
- define: FRAC_1_SQRT_2
  value: 0.7071067811865476

- define: WHITE
  value: [ 1, 1, 1 ]
- define: BLACK
  value: [ 0, 0, 0 ]
- define: RED
  value: [ 1, 0, 0 ]
- define: GREEN
  value: [ 0, 1, 0 ]
- define: BLUE
  value: [ 0, 0, 1 ]

- define: GLASS_MATERIAL
  value:
    color: BLACK
    ambient: 0.025
    diffuse: 0.2
    specular: 1.0
    shininess: 300.0
    reflective: 0.9
    transparency: 0.9
    refractive-index: 1.5

- define: MIRROR_MATERIAL
  extend: GLASS_MATERIAL
  value:
    reflective: 0.98
    transparency: 0
"#;

/// Overwrites `target.field` when the key is present in `body`.
macro_rules! parse_optional_field {
    ($self:ident, $body:ident, $target:ident, $field:ident) => {
        parse_optional_field!($self, $body, $target, stringify!($field), $field);
    };
    ($self:ident, $body:ident, $target:ident, $key:expr, $field:ident) => {
        if let Some(value) = present(&$body[$key]) {
            $target.$field = $self.parse_num(value)?;
        }
    };
}

/// `None` for keys missing from a hash.
fn present(value: &Yaml) -> Option<&Yaml> {
    (!value.is_badvalue()).then_some(value)
}

macro_rules! call_with_n_first_values {
    ($matrix:ident, $method:ident, $values:ident, 1) => {
        $matrix.$method($values[0])
    };
    ($matrix:ident, $method:ident, $values:ident, 3) => {
        $matrix.$method($values[0], $values[1], $values[2])
    };
    ($matrix:ident, $method:ident, $values:ident, 6) => {
        $matrix.$method(
            $values[0], $values[1], $values[2], $values[3], $values[4], $values[5],
        )
    };
}

macro_rules! apply_transformation {
    ($matrix:ident, $kind:ident, $method:ident, $values:ident, $n:tt) => {{
        if $values.len() != $n {
            let message = format!("{} takes {} values", $kind, $n);
            return Err(SceneError::InvalidField(message).into());
        }
        call_with_n_first_values!($matrix, $method, $values, $n);
    }};
}

struct YamlParser {
    world: World,
    camera_settings: CameraSettingsBuilder,
    max_recursive_depth: Option<usize>,
    defines: HashMap<String, Yaml>,
    shared_materials: HashMap<String, MaterialId>,
    /// Names of the defines currently being expanded, outermost first.
    expanding: RefCell<Vec<String>>,
}

impl YamlParser {
    fn new() -> Self {
        Self {
            world: World::default(),
            camera_settings: CameraSettingsBuilder::default(),
            max_recursive_depth: None,
            defines: HashMap::new(),
            shared_materials: HashMap::new(),
            expanding: RefCell::new(Vec::new()),
        }
    }

    fn with_predefined_defines() -> Result<Self> {
        let predefined = Self::str_to_yaml(PREDEFINED_DEFINES)?;
        let mut parser = Self::new();
        parser.parse(&predefined)?;
        Ok(parser)
    }

    fn self_referencing_define(name: &str) -> SceneError {
        SceneError::InvalidField(format!("define `{name}` must add a known kind"))
    }

    fn define(&self, name: &str) -> std::result::Result<&Yaml, SceneError> {
        self.defines
            .get(name)
            .ok_or_else(|| SceneError::UnknownDefine(name.to_string()))
    }

    fn enter_define(&self, name: &str) -> Result<()> {
        let mut expanding = self.expanding.borrow_mut();
        if expanding.iter().any(|outer| outer == name) {
            let chain = expanding.join(" -> ");
            let message = format!("define `{name}` refers back to itself through {chain}");
            return Err(SceneError::InvalidField(message).into());
        }
        expanding.push(name.to_string());
        Ok(())
    }

    fn leave_define(&self) {
        self.expanding.borrow_mut().pop();
    }

    /// Runs `parse` on the value of define `name`, failing on a cycle of defines.
    fn expand<T>(&self, name: &str, parse: impl FnOnce(&Yaml) -> Result<T>) -> Result<T> {
        let value = self.define(name)?;
        self.enter_define(name)?;
        let result = parse(value);
        self.leave_define();
        result
    }

    fn parse_num(&self, value: &Yaml) -> Result<f64> {
        match value {
            Yaml::Integer(value) => Ok(*value as f64),
            Yaml::Real(value) => value
                .parse()
                .map_err(|_| SceneError::InvalidField(value.to_string()).into()),
            Yaml::String(name) => {
                if let Some(string) = name.strip_prefix('-') {
                    let yaml = Yaml::from_str(string);
                    return self.parse_num(&yaml).map(|v| -v);
                }
                self.expand(name, |value| self.parse_num(value))
            }
            _ => Err(SceneError::InvalidField(format!("{value:?} is not a number")).into()),
        }
    }

    fn parse_vec(&self, vector: &[Yaml]) -> Result<Vec<f64>> {
        vector.iter().map(|v| self.parse_num(v)).collect()
    }

    fn parse_vec3(&self, value: &Yaml, field: &str) -> Result<(f64, f64, f64)> {
        if let Yaml::String(name) = value {
            return self.expand(name, |value| self.parse_vec3(value, field));
        }
        let vec = value
            .as_vec()
            .ok_or_else(|| SceneError::MissingField(field.to_string()))?;
        if vec.len() != 3 {
            return Err(SceneError::InvalidField(field.to_string()).into());
        }
        Ok((
            self.parse_num(&vec[0])?,
            self.parse_num(&vec[1])?,
            self.parse_num(&vec[2])?,
        ))
    }

    fn parse_color(&self, value: &Yaml) -> Result<Color> {
        let (r, g, b) = self.parse_vec3(value, "color")?;
        Ok(Color::new(r, g, b))
    }

    fn parse_point(&self, value: &Yaml, field: &str) -> Result<Point> {
        let (x, y, z) = self.parse_vec3(value, field)?;
        Ok(Point::new(x, y, z))
    }

    fn parse_vector(&self, value: &Yaml, field: &str) -> Result<Vector> {
        let (x, y, z) = self.parse_vec3(value, field)?;
        Ok(Vector::new(x, y, z))
    }

    fn parse_bool(&self, value: &Yaml, field: &str) -> Result<bool> {
        value
            .as_bool()
            .ok_or_else(|| SceneError::InvalidField(field.to_string()).into())
    }

    fn parse_pattern(&self, body: &Yaml) -> Result<Pattern> {
        if let Yaml::String(name) = body {
            return self.expand(name, |body| self.parse_pattern(body));
        }
        let kind = body["type"]
            .as_str()
            .ok_or_else(|| SceneError::MissingField("pattern type".to_string()))?;
        let colors = body["colors"]
            .as_vec()
            .ok_or_else(|| SceneError::MissingField("pattern colors".to_string()))?
            .iter()
            .map(|c| self.parse_color(c))
            .collect::<Result<Vec<Color>>>()?;

        let [c1, c2] = colors[..] else {
            return Err(SceneError::InvalidField("pattern colors".to_string()).into());
        };
        let pattern = Pattern::from_name(kind, c1, c2)
            .map_err(|_| SceneError::UnknownVariant(kind.to_string()))?;

        match present(&body["transform"]) {
            Some(transform) => pattern.with_transformation(self.parse_transformation(transform)?),
            None => Ok(pattern),
        }
    }

    fn parse_light(&self, body: &Yaml) -> Result<PointLightSource> {
        let at = self.parse_point(&body["at"], "at")?;
        let intensity = self.parse_color(&body["intensity"])?;

        Ok(PointLightSource::new(at, intensity))
    }

    fn parse_camera(&mut self, body: &Yaml) -> Result<()> {
        if let Some(width) = present(&body["width"]) {
            let width = self.parse_num(width)? as usize;
            self.camera_settings.target_width(width);
        }
        if let Some(height) = present(&body["height"]) {
            let height = self.parse_num(height)? as usize;
            self.camera_settings.target_height(height);
        }
        for key in ["fov", "field-of-view"] {
            if let Some(fov) = present(&body[key]) {
                let fov = self.parse_num(fov)?;
                self.camera_settings.field_of_view(fov);
            }
        }

        let orientation = ["from", "to", "up"];
        if orientation.iter().all(|key| present(&body[*key]).is_none()) {
            return Ok(());
        }
        let from = self.parse_point(&body["from"], "from")?;
        let to = self.parse_point(&body["to"], "to")?;
        let up = self.parse_vector(&body["up"], "up")?;

        self.camera_settings
            .view_transformation(Matrix::view_transformation(from, to, up));
        Ok(())
    }

    fn parse_material_body(&self, body: &Yaml) -> Result<Material> {
        if let Yaml::String(name) = body {
            return self.expand(name, |body| self.parse_material_body(body));
        }
        if body.as_hash().is_none() {
            return Err(SceneError::InvalidField("material".to_string()).into());
        }
        let mut material = Material::default();

        material.pattern = match (present(&body["color"]), present(&body["pattern"])) {
            (None, None) => material.pattern,
            (Some(color), None) => Pattern::Const(self.parse_color(color)?),
            (None, Some(pattern)) => self.parse_pattern(pattern)?,
            (Some(_), Some(_)) => {
                let message = "material has both color and pattern".to_string();
                return Err(SceneError::InvalidField(message).into());
            }
        };

        parse_optional_field!(self, body, material, ambient);
        parse_optional_field!(self, body, material, diffuse);
        parse_optional_field!(self, body, material, specular);
        parse_optional_field!(self, body, material, shininess);
        parse_optional_field!(self, body, material, transparency);
        parse_optional_field!(self, body, material, "refractive-index", refractive_index);
        // either spelling
        parse_optional_field!(self, body, material, "reflective", reflectivity);
        parse_optional_field!(self, body, material, reflectivity);

        Ok(material)
    }

    /// Inline materials are owned by the object.
    /// A material referenced by define name is created once and shared by all its users.
    fn parse_material(&mut self, body: &Yaml) -> Result<MaterialRef> {
        match body {
            Yaml::BadValue => Ok(MaterialRef::default()),
            Yaml::String(name) => {
                if let Some(&id) = self.shared_materials.get(name) {
                    return Ok(MaterialRef::Shared(id));
                }
                let material = self.expand(name, |body| self.parse_material_body(body))?;
                let id = self.world.add_shared_material(material);
                self.shared_materials.insert(name.clone(), id);
                log::debug!("material `{name}` is shared");
                Ok(MaterialRef::Shared(id))
            }
            _ => self.parse_material_body(body).map(MaterialRef::Owned),
        }
    }

    fn apply_transformation_literal(&self, matrix: &mut Matrix, body: &Yaml) -> Result<()> {
        let items = body
            .as_vec()
            .ok_or_else(|| SceneError::InvalidField("transform".to_string()))?;
        let (kind, args) = items
            .split_first()
            .ok_or_else(|| SceneError::MissingField("transform kind".to_string()))?;
        let kind = kind
            .as_str()
            .ok_or_else(|| SceneError::InvalidField("transform kind".to_string()))?;

        if kind == "reflect" {
            let axis_name = args
                .first()
                .and_then(Yaml::as_str)
                .ok_or_else(|| SceneError::MissingField("reflect axis".to_string()))?;
            match Axis::from_name(axis_name) {
                Some(axis) => {
                    matrix.reflect(axis);
                }
                None => log::warn!("unknown reflection axis `{axis_name}`, leaving it out"),
            }
            return Ok(());
        }

        let values = self.parse_vec(args)?;
        match kind {
            "translate" => apply_transformation!(matrix, kind, translate, values, 3),
            "scale" => apply_transformation!(matrix, kind, scale, values, 3),
            "scale-uniform" => apply_transformation!(matrix, kind, scale_uniform, values, 1),
            "rotate-x" => apply_transformation!(matrix, kind, rotate_x, values, 1),
            "rotate-y" => apply_transformation!(matrix, kind, rotate_y, values, 1),
            "rotate-z" => apply_transformation!(matrix, kind, rotate_z, values, 1),
            "shear" => apply_transformation!(matrix, kind, shear, values, 6),
            _ => return Err(SceneError::UnknownVariant(kind.to_string()).into()),
        }
        Ok(())
    }

    /// Transformations are listed in the order they are applied.
    fn parse_transformation(&self, body: &Yaml) -> Result<Matrix> {
        match body {
            Yaml::BadValue => Ok(Matrix::identity()),
            Yaml::String(name) => self.expand(name, |body| self.parse_transformation(body)),
            Yaml::Array(arr) => {
                let mut matrix = Matrix::identity();
                for val in arr {
                    match val {
                        Yaml::String(name) => {
                            let defined =
                                self.expand(name, |body| self.parse_transformation(body))?;
                            matrix.transform_chain(&defined);
                        }
                        _ => self.apply_transformation_literal(&mut matrix, val)?,
                    }
                }
                Ok(matrix)
            }
            _ => Err(SceneError::InvalidField("transform".to_string()).into()),
        }
    }

    /// `min`, `max` and `closed` of cylinders and cones, unbounded and open by default.
    fn parse_bounds(&self, body: &Yaml) -> Result<(f64, f64, bool)> {
        let mut bounds = Cylinder::default();
        parse_optional_field!(self, body, bounds, "min", y_min);
        parse_optional_field!(self, body, bounds, "max", y_max);
        if let Some(closed) = present(&body["closed"]) {
            bounds.closed = self.parse_bool(closed, "closed")?;
        }
        Ok((bounds.y_min, bounds.y_max, bounds.closed))
    }

    fn parse_object_with_kind(&mut self, body: &Yaml, obj_kind: &str) -> Result<Object> {
        let shape = match obj_kind {
            "sphere" => Shape::Sphere,
            "cube" => Shape::Cube,
            "plane" => Shape::Plane,
            "cylinder" => {
                let (y_min, y_max, closed) = self.parse_bounds(body)?;
                Shape::Cylinder(Cylinder::new(y_min, y_max, closed))
            }
            "cone" => {
                let (y_min, y_max, closed) = self.parse_bounds(body)?;
                Shape::Cone(Cone::new(y_min, y_max, closed))
            }
            name => {
                let body = self.merge_use_define(name, self.define(name)?, body)?;
                let what = body["add"]
                    .as_str()
                    .ok_or_else(|| SceneError::MissingField("add".to_string()))?;
                if what == name {
                    return Err(Self::self_referencing_define(name).into());
                }
                self.enter_define(name)?;
                let object = self.parse_object_with_kind(&body, what);
                self.leave_define();
                return object;
            }
        };

        let transformation = self.parse_transformation(&body["transform"])?;
        let mut object = Object::primitive_with_transformation(shape, transformation)?
            .with_material_ref(self.parse_material(&body["material"])?);

        if let Some(shadow) = present(&body["shadow"]) {
            object.set_casts_shadow(self.parse_bool(shadow, "shadow")?);
        }
        Ok(object)
    }

    fn parse_options(&mut self, body: &Yaml) -> Result<()> {
        if let Some(depth) = present(&body["max-recursive-depth"]) {
            self.max_recursive_depth = Some(self.parse_num(depth)? as usize);
        }
        Ok(())
    }

    fn parse_add(&mut self, what: &str, body: &Yaml) -> Result<()> {
        match what {
            "camera" => self.parse_camera(body)?,
            "light" => {
                let light = self.parse_light(body)?;
                if self.world.set_light(light).is_some() {
                    log::warn!("scene adds more than one light, keeping the last one");
                }
            }
            "sphere" | "cube" | "plane" | "cylinder" | "cone" => {
                let object = self.parse_object_with_kind(body, what)?;
                self.world.add_object(object)?;
            }
            name => {
                let body = self.merge_use_define(name, self.define(name)?, body)?;
                let inner = match body["add"].as_str() {
                    Some(inner) if inner != name => inner,
                    _ => return Err(Self::self_referencing_define(name).into()),
                };
                self.enter_define(name)?;
                let added = self.parse_add(inner, &body);
                self.leave_define();
                added?;
            }
        }
        Ok(())
    }

    /// Fields of `used` override those of `defined`.
    /// Nested hashes merge recursively, `transform` lists are concatenated,
    /// and a string naming the define itself keeps the define's own value.
    fn merge_hash(
        &self,
        name: &str,
        defined: &saphyr::Hash,
        used: &saphyr::Hash,
    ) -> Result<Yaml> {
        let mut merged = defined.clone();

        for (key, used_value) in used {
            let Some(slot) = merged.get_mut(key) else {
                merged.insert(key.clone(), used_value.clone());
                continue;
            };
            let merged_value = match (&*slot, used_value) {
                (Yaml::Hash(defined), Yaml::Hash(used)) => self.merge_hash(name, defined, used)?,
                (Yaml::Array(defined), Yaml::Array(used)) if key.as_str() == Some("transform") => {
                    Yaml::Array(defined.iter().chain(used).cloned().collect())
                }
                (Yaml::String(_), Yaml::String(used)) if used == name => slot.clone(),
                (_, used) => used.clone(),
            };
            *slot = merged_value;
        }
        Ok(Yaml::Hash(merged))
    }

    fn merge_use_define(&self, define_name: &str, define_body: &Yaml, body: &Yaml) -> Result<Yaml> {
        let extend_hash = define_body
            .as_hash()
            .ok_or_else(|| SceneError::InvalidField(define_name.to_string()))?;
        let body_hash = body
            .as_hash()
            .ok_or_else(|| SceneError::InvalidField(define_name.to_string()))?;
        self.merge_hash(define_name, extend_hash, body_hash)
    }

    fn parse_define(&mut self, name: &str, extends: Option<&str>, body: &Yaml) -> Result<()> {
        let value = match extends {
            Some(extend) => self.merge_use_define(name, self.define(extend)?, body)?,
            None => body.clone(),
        };
        if self.defines.insert(name.to_string(), value).is_some() {
            log::debug!("define `{name}` redefined");
        }
        Ok(())
    }

    fn parse_operation(&mut self, yaml_obj: &Yaml) -> Result<()> {
        let Yaml::Hash(hash) = yaml_obj else {
            return Err(SceneError::UnexpectedValue.into());
        };
        match hash.front() {
            Some((Yaml::String(operation), Yaml::String(what))) => match operation.as_str() {
                "add" => self.parse_add(what, yaml_obj)?,
                "define" => {
                    let extends = yaml_obj["extend"].as_str();
                    let body = &yaml_obj["value"];
                    self.parse_define(what, extends, body)?;
                }
                other => log::warn!("unknown scene operation `{other}` skipped"),
            },
            Some((Yaml::String(operation), Yaml::Null)) => match operation.as_str() {
                "camera" => self.parse_camera(yaml_obj)?,
                "options" => self.parse_options(yaml_obj)?,
                other => log::warn!("unknown scene operation `{other}` skipped"),
            },
            _ => return Err(SceneError::UnexpectedValue.into()),
        }
        Ok(())
    }

    fn parse(&mut self, yaml: &Yaml) -> Result<()> {
        let operations = match yaml {
            Yaml::Array(operations) => operations,
            Yaml::Null | Yaml::BadValue => return Ok(()),
            _ => return Err(SceneError::UnexpectedValue.into()),
        };
        for yaml_obj in operations {
            self.parse_operation(yaml_obj)?;
        }
        Ok(())
    }

    fn parse_consume(mut self, yaml: &Yaml) -> Result<YamlSceneConfig> {
        self.parse(yaml)?;

        if self.world.light().is_none() {
            log::warn!("scene has no light, every object will be black");
        }
        log::debug!(
            "parsed {} objects and {} shared materials",
            self.world.objects().len(),
            self.shared_materials.len()
        );

        Ok(YamlSceneConfig {
            world: self.world,
            camera_settings: self.camera_settings,
            max_recursive_depth: self.max_recursive_depth,
        })
    }

    fn str_to_yaml(source: &str) -> Result<Yaml> {
        let mut docs = Yaml::load_from_str(source)
            .map_err(|err| SceneError::YamlSyntax(err.to_string()))?;
        match docs.len() {
            1 => Ok(std::mem::replace(&mut docs[0], Yaml::BadValue)),
            0 => Ok(Yaml::Array(vec![])),
            _ => Err(SceneError::MultipleDocuments.into()),
        }
    }
}

pub fn parse_str(source: &str) -> Result<YamlSceneConfig> {
    let yaml = YamlParser::str_to_yaml(source)?;
    YamlParser::with_predefined_defines()?.parse_consume(&yaml)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<YamlSceneConfig> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let config = parse_str(&source)?;
    log::info!("scene loaded from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;
    use crate::{assert_approx_eq_low_prec, error::Error};

    fn test_parse(source: &str) -> (World, Camera) {
        let config = parse_str(source).unwrap();
        let camera = config.camera().unwrap();
        (config.world, camera)
    }

    fn only_object(world: &World) -> &Object {
        assert_eq!(world.objects().len(), 1);
        &world.objects()[0]
    }

    #[test]
    fn empty_yaml() {
        let (world, camera) = test_parse("");

        assert!(world.objects().is_empty());
        assert!(world.light().is_none());
        assert_eq!(
            camera,
            Camera::new(
                CameraSettings::DEFAULT_WIDTH,
                CameraSettings::DEFAULT_HEIGHT,
                CameraSettings::DEFAULT_FOV
            )
        );
    }

    #[test]
    fn config_is_debug_printable() {
        let config = parse_str("- add: camera\n  width: 20\n  height: 10\n").unwrap();
        let printed = format!("{config:?}");

        assert!(printed.contains("CameraSettingsBuilder"));
        assert!(printed.contains("20"));
    }

    #[test]
    fn comments_are_supported() {
        let _ = test_parse("#comment");
    }

    #[test]
    fn parse_light() {
        const LIGHT_YAML: &str = r#"
- add: light
  at: [ 50, 100, -50 ]
  intensity: [ 1, 1, 1]
"#;
        let (world, _) = test_parse(LIGHT_YAML);
        let expected_light = PointLightSource::new(Point::new(50., 100., -50.), Color::white());

        assert_eq!(world.light(), Some(&expected_light));
    }

    #[test]
    fn later_light_replaces_earlier() {
        const LIGHTS_YAML: &str = r#"
- add: light
  at: [ 50, 100, -50 ]
  intensity: WHITE
- add: light
  at: [ -10, 10, -10 ]
  intensity: [ 0.5, 0.5, 0.5 ]
"#;
        let (world, _) = test_parse(LIGHTS_YAML);
        let expected_light =
            PointLightSource::new(Point::new(-10., 10., -10.), Color::new(0.5, 0.5, 0.5));

        assert_eq!(world.light(), Some(&expected_light));
    }

    #[test]
    fn parse_camera() {
        const CAMERA_YAML: &str = r#"
- add: camera
  width: 100
  height: 50
  field-of-view: 0.785
  from: [ -6, 6, -10 ]
  to: [ 6, 0, 6 ]
  up: [ -0.45, 1, 0 ]
"#;
        let (_, camera) = test_parse(CAMERA_YAML);
        let view = Matrix::view_transformation(
            Point::new(-6., 6., -10.),
            Point::new(6., 0., 6.),
            Vector::new(-0.45, 1., 0.),
        );

        assert_eq!(
            camera,
            Camera::with_transformation(100, 50, 0.785, view).unwrap()
        );
    }

    #[test]
    fn camera_without_from_up_to() {
        const CAMERA_YAML: &str = r#"
- camera:
  width: 100
  height: 100
  fov: 0.785
"#;
        let (_, camera) = test_parse(CAMERA_YAML);

        assert_eq!(camera, Camera::new(100, 100, 0.785));
    }

    #[test]
    fn cli_overrides_scene_camera() {
        const CAMERA_YAML: &str = r#"
- add: camera
  width: 100
  height: 100
"#;
        let mut config = parse_str(CAMERA_YAML).unwrap();
        config.camera_settings.target_width(20);

        let camera = config.camera().unwrap();
        assert_eq!(camera.target_width(), 20);
        assert_eq!(camera.target_height(), 100);
    }

    #[test]
    fn parse_options() {
        const OPTIONS_YAML: &str = r#"
- options:
  max-recursive-depth: 3
"#;
        let config = parse_str(OPTIONS_YAML).unwrap();

        assert_eq!(config.max_recursive_depth, Some(3));
    }

    #[test]
    fn parse_plane() {
        const PLANE_YAML: &str = r#"
- add: plane
  material:
    color: [ 1, 1, 1 ]
    ambient: 1
    diffuse: 0
    specular: 0
  transform:
    - [ rotate-x, FRAC_PI_2 ]
    - [ translate, 0, 0, 500 ]
"#;
        let (world, _) = test_parse(PLANE_YAML);
        let plane = only_object(&world);

        let expected_material = Material {
            pattern: Pattern::Const(Color::white()),
            ambient: 1.,
            diffuse: 0.,
            specular: 0.,
            ..Material::default()
        };
        let expected_transformation = Matrix::rotation_x(FRAC_PI_2)
            .translate(0., 0., 500.)
            .transformed();

        assert_eq!(plane.shape(), &Shape::Plane);
        assert_eq!(world.material_of(plane), &expected_material);
        assert_approx_eq_low_prec!(*plane.transformation(), expected_transformation);
    }

    #[test]
    fn objects_have_default_material_and_transformation() {
        let (world, _) = test_parse("- add: sphere");
        let sphere = only_object(&world);

        assert_eq!(sphere.shape(), &Shape::Sphere);
        assert_eq!(sphere.material_ref(), &MaterialRef::Owned(Material::default()));
        assert_approx_eq_low_prec!(*sphere.transformation(), Matrix::identity());
        assert!(sphere.casts_shadow());
    }

    #[test]
    fn parse_sphere() {
        const SPHERE_YAML: &str = r#"
- add: sphere
  material:
    color: [ 0.373, 0.404, 0.550 ]
    diffuse: 0.2
    ambient: 0.0
    specular: 1.0
    shininess: 200
    reflective: 0.7
    transparency: 0.7
    refractive-index: 1.5
"#;
        let (world, _) = test_parse(SPHERE_YAML);
        let expected_material = Material {
            pattern: Pattern::Const(Color::new(0.373, 0.404, 0.550)),
            ambient: 0.,
            diffuse: 0.2,
            specular: 1.,
            shininess: 200.,
            reflectivity: 0.7,
            transparency: 0.7,
            refractive_index: 1.5,
        };

        assert_eq!(world.material_of(only_object(&world)), &expected_material);
    }

    #[test]
    fn objects_without_shadow() {
        const SHADOW_YAML: &str = r#"
- add: cube
  shadow: false
"#;
        let (world, _) = test_parse(SHADOW_YAML);

        assert!(!only_object(&world).casts_shadow());
    }

    #[test]
    fn parse_define_materials_are_shared() {
        const DEFINE_MATERIALS_YAML: &str = r#"
- define: white-material
  value:
    color: [ 1, 1, 1 ]
    diffuse: 0.7
- define: blue-material
  extend: white-material
  value:
    color: [ 0, 0, 1 ]
- add: sphere
  material: white-material
- add: cube
  material: blue-material
- add: plane
  material: white-material
"#;
        let (mut world, _) = test_parse(DEFINE_MATERIALS_YAML);
        let white_material = Material {
            pattern: Pattern::Const(Color::white()),
            diffuse: 0.7,
            ..Material::default()
        };
        let blue_material = Material {
            pattern: Pattern::Const(Color::blue()),
            ..white_material.clone()
        };

        let objects = world.objects();
        assert_eq!(world.material_of(&objects[0]), &white_material);
        assert_eq!(world.material_of(&objects[1]), &blue_material);
        assert_eq!(objects[0].material_ref(), objects[2].material_ref());

        let MaterialRef::Shared(white_id) = *objects[0].material_ref() else {
            panic!("named material should be shared");
        };
        world.shared_material_mut(white_id).unwrap().ambient = 0.5;

        let objects = world.objects();
        assert_approx_eq_low_prec!(world.material_of(&objects[0]).ambient, 0.5);
        assert_approx_eq_low_prec!(world.material_of(&objects[2]).ambient, 0.5);
        assert_approx_eq_low_prec!(world.material_of(&objects[1]).ambient, 0.1);
    }

    #[test]
    fn predefined_materials() {
        const PREDEFINED_YAML: &str = r#"
- add: sphere
  material: GLASS_MATERIAL
- add: sphere
  material: MIRROR_MATERIAL
"#;
        let (world, _) = test_parse(PREDEFINED_YAML);
        let objects = world.objects();

        assert_eq!(world.material_of(&objects[0]), &Material::glass());
        assert_eq!(world.material_of(&objects[1]), &Material::mirror());
    }

    #[test]
    fn parse_define_transforms() {
        const DEFINE_TRANSFORMS_YAML: &str = r#"
- define: standard-transform
  value:
    - [ translate, 1, -1, 1 ]
    - [ scale, 0.5, 0.5, 0.5 ]
- define: large-object
  value:
    - standard-transform
    - [ scale-uniform, 4 ]
- add: sphere
  transform:
    - standard-transform
- add: cube
  transform: large-object
"#;
        let (world, _) = test_parse(DEFINE_TRANSFORMS_YAML);
        let standard_transform = Matrix::translation(1., -1., 1.)
            .scale(0.5, 0.5, 0.5)
            .transformed();
        let large_object_transform = standard_transform.transform_new(&Matrix::scaling_uniform(4.));

        let objects = world.objects();
        assert_approx_eq_low_prec!(*objects[0].transformation(), standard_transform);
        assert_approx_eq_low_prec!(*objects[1].transformation(), large_object_transform);
    }

    #[test]
    fn parse_all_transformations() {
        const TRANSFORM_YAML: &str = r#"
- add: sphere
  transform:
    - [ rotate-y, -FRAC_PI_4 ]
    - [ rotate-z, 1 ]
    - [ shear, 1, 0, 0, 0, 0, 1 ]
    - [ reflect, y ]
"#;
        let (world, _) = test_parse(TRANSFORM_YAML);
        let expected = Matrix::rotation_y(-FRAC_PI_4)
            .rotate_z(1.)
            .shear(1., 0., 0., 0., 0., 1.)
            .reflect(Axis::Y)
            .transformed();

        assert_approx_eq_low_prec!(*only_object(&world).transformation(), expected);
    }

    #[test]
    fn unknown_reflection_axis_is_skipped() {
        const TRANSFORM_YAML: &str = r#"
- add: sphere
  transform:
    - [ reflect, w ]
    - [ translate, 1, 2, 3 ]
"#;
        let (world, _) = test_parse(TRANSFORM_YAML);

        assert_approx_eq_low_prec!(
            *only_object(&world).transformation(),
            Matrix::translation(1., 2., 3.)
        );
    }

    #[test]
    fn parse_use_define_in_add() {
        const DEFINE_OBJECT_YAML: &str = r#"
- define: small-sphere
  value:
    add: sphere
    material:
      color: RED
    transform:
      - [ scale-uniform, 0.5 ]
- add: small-sphere
  transform:
    - [ translate, 0, 1, 0 ]
"#;
        let (world, _) = test_parse(DEFINE_OBJECT_YAML);
        let sphere = only_object(&world);

        assert_eq!(sphere.shape(), &Shape::Sphere);
        assert_eq!(world.material_of(sphere), &Material::with_color(Color::red()));
        assert_approx_eq_low_prec!(
            *sphere.transformation(),
            Matrix::scaling_uniform(0.5)
                .translate(0., 1., 0.)
                .transformed()
        );
    }

    #[test]
    fn parse_cylinder() {
        const CYLINDER_YAML: &str = r#"
- add: cylinder
  min: -1
  max: 2.5
  closed: true
- add: cylinder
"#;
        let (world, _) = test_parse(CYLINDER_YAML);
        let objects = world.objects();

        assert_eq!(objects[0].shape(), &Shape::cylinder(-1., 2.5, true));
        assert_eq!(objects[1].shape(), &Shape::default_cylinder());
    }

    #[test]
    fn parse_cone() {
        const CONE_YAML: &str = r#"
- add: cone
  min: -PI
  max: 0
  closed: false
"#;
        let (world, _) = test_parse(CONE_YAML);

        assert_eq!(
            only_object(&world).shape(),
            &Shape::cone(-std::f64::consts::PI, 0., false)
        );
    }

    #[test]
    fn parse_patterns() {
        const PATTERN_YAML: &str = r#"
- add: plane
  material:
    pattern:
      type: checkers
      colors:
        - WHITE
        - [ 0, 0, 0 ]
      transform:
        - [ scale-uniform, 0.25 ]
- add: sphere
  material:
    pattern:
      type: stripes
      colors: [ RED, BLUE ]
"#;
        let (world, _) = test_parse(PATTERN_YAML);
        let objects = world.objects();

        let checkers = Pattern::checkers(Color::white(), Color::black())
            .with_transformation(Matrix::scaling_uniform(0.25))
            .unwrap();
        assert_eq!(world.material_of(&objects[0]).pattern, checkers);
        assert_eq!(
            world.material_of(&objects[1]).pattern,
            Pattern::stripe(Color::red(), Color::blue())
        );
    }

    #[test]
    fn unknown_define_is_an_error() {
        let result = parse_str("- add: sphere\n  material: no-such-material");

        assert!(matches!(
            result,
            Err(Error::Scene(SceneError::UnknownDefine(name))) if name == "no-such-material"
        ));
    }

    #[test]
    fn defines_adding_each_other_are_an_error() {
        let result = parse_str("- define: a\n  value:\n    add: b\n- define: b\n  value:\n    add: a\n- add: a\n");

        assert!(matches!(
            result,
            Err(Error::Scene(SceneError::InvalidField(message))) if message.contains("`a`")
        ));
    }

    #[test]
    fn cyclic_value_defines_are_an_error() {
        const CYCLE_YAML: &str = r#"
- define: ping
  value: pong
- define: pong
  value: ping
- add: sphere
  material:
    ambient: ping
"#;
        assert!(matches!(
            parse_str(CYCLE_YAML),
            Err(Error::Scene(SceneError::InvalidField(_)))
        ));

        const TRANSFORM_CYCLE_YAML: &str = r#"
- define: spin
  value:
    - twirl
- define: twirl
  value:
    - spin
- add: cube
  transform: spin
"#;
        assert!(matches!(
            parse_str(TRANSFORM_CYCLE_YAML),
            Err(Error::Scene(SceneError::InvalidField(_)))
        ));
    }

    #[test]
    fn define_can_be_used_repeatedly() {
        const REPEAT_YAML: &str = r#"
- define: half
  value: 0.5
- define: shift
  value:
    - [ translate, half, half, half ]
- add: sphere
  transform:
    - shift
    - shift
  material:
    ambient: half
    diffuse: half
"#;
        let (world, _) = test_parse(REPEAT_YAML);
        let object = only_object(&world);

        assert_approx_eq_low_prec!(object.transformation(), &Matrix::translation(1., 1., 1.));
        assert_approx_eq_low_prec!(world.material_of(object).diffuse, 0.5);
    }

    #[test]
    fn unknown_pattern_is_an_error() {
        const PATTERN_YAML: &str = r#"
- add: plane
  material:
    pattern:
      type: spiral
      colors: [ RED, BLUE ]
"#;
        assert!(matches!(
            parse_str(PATTERN_YAML),
            Err(Error::Scene(SceneError::UnknownVariant(_)))
        ));
    }

    #[test]
    fn singular_transformation_is_an_error() {
        const SINGULAR_YAML: &str = r#"
- add: sphere
  transform:
    - [ scale, 0, 1, 1 ]
"#;
        assert!(matches!(parse_str(SINGULAR_YAML), Err(Error::SingularMatrix)));
    }

    #[test]
    fn wrong_transformation_arity_is_an_error() {
        const ARITY_YAML: &str = r#"
- add: sphere
  transform:
    - [ translate, 1, 2 ]
"#;
        assert!(matches!(
            parse_str(ARITY_YAML),
            Err(Error::Scene(SceneError::InvalidField(_)))
        ));
    }

    #[test]
    fn malformed_scenes_are_errors() {
        assert!(matches!(
            parse_str("- add: [ sphere"),
            Err(Error::Scene(SceneError::YamlSyntax(_)))
        ));
        assert!(matches!(
            parse_str("- add: sphere\n---\n- add: cube\n"),
            Err(Error::Scene(SceneError::MultipleDocuments))
        ));
        assert!(matches!(
            parse_str("- just a string"),
            Err(Error::Scene(SceneError::UnexpectedValue))
        ));
    }

    #[test]
    fn missing_scene_file_is_io_error() {
        assert!(matches!(
            parse_file("no/such/scene.yaml"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn merging_material_define() {
        const MERGE_YAML: &str = r#"
- define: base
  value:
    add: sphere
    material:
      color: [ 1, 0, 0 ]
      ambient: 0.3
- add: base
  material:
    diffuse: 0.4
"#;
        let (world, _) = test_parse(MERGE_YAML);
        let expected = Material {
            pattern: Pattern::Const(Color::red()),
            ambient: 0.3,
            diffuse: 0.4,
            ..Material::default()
        };

        assert_eq!(world.material_of(only_object(&world)), &expected);
    }
}
