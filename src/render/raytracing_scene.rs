use super::tiles::{buffer_offset, generate_tiles, RenderTile, CHANNELS};
use super::{Camera, RenderOptions, BIAS};
use crate::core::{Transformed, EPSILON};
use crate::lights::{AmbientLight, PointLight};
use crate::primitives::Primitive;
use crate::ray_intersection::{Intersectable, Intersection, Ray, SurfaceHit};
use crate::utils;
use image::RgbImage;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info};
use nalgebra::{Affine3, Point3, Vector3};
use rayon::prelude::*;
use std::cmp::Ordering::Equal;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RaytracingCamera {
    fov: f64,
    position: Point3<f64>,
    camera_to_world: Affine3<f64>,
}

impl From<Camera> for RaytracingCamera {
    fn from(camera: Camera) -> Self {
        Self {
            fov: camera.fov.to_radians(),
            position: camera.get_position(),
            camera_to_world: camera.transform.rigid_matrix(),
        }
    }
}

/// A validated scene, ready to be traced. Nothing in it changes while rendering.
#[derive(Debug)]
pub struct RaytracingScene {
    pub render_options: RenderOptions,
    camera: RaytracingCamera,
    ambient_light: AmbientLight,
    objects: Vec<Primitive>,
    lights: Vec<PointLight>,
}

impl RaytracingScene {
    pub(crate) fn new(
        render_options: RenderOptions,
        camera: RaytracingCamera,
        ambient_light: AmbientLight,
        objects: Vec<Primitive>,
        lights: Vec<PointLight>,
    ) -> Self {
        Self {
            render_options,
            camera,
            ambient_light,
            objects,
            lights,
        }
    }

    pub fn get_width(&self) -> u32 {
        self.render_options.width
    }

    pub fn get_height(&self) -> u32 {
        self.render_options.height
    }

    pub fn get_num_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn get_num_lights(&self) -> usize {
        self.lights.len()
    }

    /// Nearest primitive along the ray. Equal distances resolve to the
    /// primitive added to the scene first.
    pub fn raycast(&self, ray: &Ray) -> Option<Intersection> {
        self.objects
            .iter()
            .filter_map(|object| {
                object
                    .intersect(ray)
                    .map(|distance| Intersection::new(object, distance))
            })
            .min_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Equal))
    }

    fn shadow_cast(&self, ray: &Ray, max_distance: f64) -> bool {
        self.objects.iter().any(|object| {
            object
                .intersect(ray)
                .map_or(false, |distance| distance < max_distance - BIAS)
        })
    }

    pub fn get_color(&self, ray: &Ray) -> Vector3<f64> {
        let intersection = match self.raycast(ray) {
            Some(intersection) => intersection,
            None => return Vector3::zeros(),
        };
        let SurfaceHit { hit_point, normal } = intersection.surface(ray);

        let mut irradiance = self.ambient_light.get_color();
        for light in &self.lights {
            let light_dir = light.get_position() - hit_point;
            let light_distance = light_dir.magnitude();
            if light_distance < EPSILON {
                continue;
            }
            let light_dir = light_dir / light_distance;

            let n_dot_l = normal.dot(&light_dir);
            if n_dot_l <= 0.0 {
                continue;
            }

            if self.render_options.shadows {
                let shadow_ray = Ray::new(hit_point + normal.into_inner() * BIAS, light_dir);
                if self.shadow_cast(&shadow_ray, light_distance) {
                    continue;
                }
            }

            irradiance += light.get_color(light_distance) * n_dot_l;
        }

        intersection.object.get_color().component_mul(&irradiance)
    }

    pub fn build_camera_ray(&self, x: u32, y: u32) -> Ray {
        debug_assert!(x < self.get_width() && y < self.get_height());

        let (x, y) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let (width, height) = (f64::from(self.get_width()), f64::from(self.get_height()));
        let aspect = width / height;
        let fov = (self.camera.fov / 2.0).tan();

        let (x, y) = (
            utils::remap_value(x, (0.0, width), (-1.0, 1.0)),
            utils::remap_value(y, (0.0, height), (1.0, -1.0)),
        );

        // Apply fov and scale to aspect ratio
        let (x, y) = (x * aspect * fov, y * fov);

        let direction = Vector3::from([x, y, -1.0]).normalize();
        let direction = self.camera.camera_to_world * direction;

        Ray::new(self.camera.position, direction)
    }

    pub fn screen_raycast(&self, x: u32, y: u32) -> [u8; 3] {
        let ray = self.build_camera_ray(x, y);
        utils::to_rgb_u8(self.get_color(&ray))
    }

    /// Traces every in-bounds pixel of the tile, returning buffer offsets and colors.
    pub fn render_tile(&self, tile: &RenderTile) -> Vec<(usize, [u8; 3])> {
        let width = self.get_width();

        tile.pixels(width, self.get_height())
            .map(|(x, y)| (buffer_offset(x, y, width), self.screen_raycast(x, y)))
            .collect()
    }

    pub fn build_progress_bar(&self) -> ProgressBar {
        let tiles = generate_tiles(
            self.get_width(),
            self.get_height(),
            self.render_options.tile_size,
        );

        let progress = ProgressBar::new(tiles.len() as u64);
        progress.set_style(ProgressStyle::default_bar().template(
            "[{elapsed_precise} elapsed] [{eta_precise} left] {bar:40} {pos}/{len} tiles",
        ));

        progress
    }

    pub fn render(&self) -> Vec<u8> {
        self.render_with_progress(None)
    }

    /// Renders the scene into a row-major interleaved RGB buffer. Pixels
    /// whose primary ray hits nothing stay black.
    pub fn render_with_progress(&self, progress: Option<ProgressBar>) -> Vec<u8> {
        let width = self.get_width();
        let height = self.get_height();
        let tiles = generate_tiles(width, height, self.render_options.tile_size);
        debug!(
            "Rendering {} tiles of {}px on {} threads",
            tiles.len(),
            self.render_options.tile_size,
            rayon::current_num_threads()
        );

        let render_tile = |tile: &RenderTile| self.render_tile(tile);
        let rendered_tiles: Vec<Vec<(usize, [u8; 3])>> = if let Some(progress) = progress {
            let rendered_tiles: Vec<_> = tiles
                .par_iter()
                .progress_with(progress.clone())
                .map(render_tile)
                .collect();
            progress.finish();

            rendered_tiles
        } else {
            tiles.par_iter().map(render_tile).collect()
        };

        let mut image_buffer = vec![0; width as usize * height as usize * CHANNELS];
        for (offset, rgb) in rendered_tiles.into_iter().flatten() {
            image_buffer[offset..offset + CHANNELS].copy_from_slice(&rgb);
        }

        image_buffer
    }

    /// Renders the scene into an image and reports how long tracing took.
    ///
    /// # Panics
    ///
    /// Will panic if the rendered buffer does not hold `width * height` RGB
    /// pixels, which `render_with_progress` guarantees
    pub fn raytrace_to_image(&self, progress: Option<ProgressBar>) -> (RgbImage, Duration) {
        let start = Instant::now();
        let image_buffer = self.render_with_progress(progress);
        let duration = start.elapsed();
        info!(
            "Rendered {}x{} pixels in {:.3?}",
            self.get_width(),
            self.get_height(),
            duration
        );

        let image = RgbImage::from_raw(self.get_width(), self.get_height(), image_buffer)
            .expect("buffer length matches the image dimensions");

        (image, duration)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Transform;
    use crate::primitives::{Plane, Sphere};
    use more_asserts::{assert_gt, assert_lt};

    fn camera_at(position: [f64; 3]) -> RaytracingCamera {
        Camera {
            transform: *Transform::default().translate(Vector3::from(position)),
            ..Camera::default()
        }
        .into()
    }

    fn options(width: u32, height: u32) -> RenderOptions {
        RenderOptions {
            width,
            height,
            tile_size: 4,
            ..RenderOptions::default()
        }
    }

    fn sphere(radius: f64, position: [f64; 3], color: [f64; 3]) -> Primitive {
        Primitive::Sphere(Sphere::new(
            radius,
            *Transform::default().translate(Vector3::from(position)),
            Vector3::from(color),
        ))
    }

    fn floor(color: [f64; 3]) -> Primitive {
        Primitive::Plane(Plane::new(
            Vector3::from([0.0, -1.0, 0.0]),
            Transform::default(),
            Vector3::from(color),
        ))
    }

    fn light(position: [f64; 3], intensity: f64) -> PointLight {
        PointLight::new(
            Vector3::from([1.0; 3]),
            intensity,
            *Transform::default().translate(Vector3::from(position)),
        )
    }

    fn scene(
        render_options: RenderOptions,
        ambient: [f64; 3],
        objects: Vec<Primitive>,
        lights: Vec<PointLight>,
    ) -> RaytracingScene {
        RaytracingScene::new(
            render_options,
            camera_at([0.0, 0.0, 0.0]),
            AmbientLight::new(Vector3::from(ambient)),
            objects,
            lights,
        )
    }

    fn down_at(x: f64, z: f64) -> Ray {
        Ray::new(Point3::from([x, 5.0, z]), Vector3::from([0.0, -1.0, 0.0]))
    }

    #[test]
    fn it_renders_empty_scenes_black() {
        let scene = scene(options(13, 7), [1.0; 3], Vec::new(), vec![light([0.0; 3], 1.0)]);
        let image_buffer = scene.render();

        assert_eq!(image_buffer.len(), 13 * 7 * 3);
        assert!(image_buffer.iter().all(|&c| c == 0));
    }

    #[test]
    fn it_renders_unlit_spheres_in_their_albedo() {
        let color = [1.0, 0.5, 0.2];
        let scene = scene(
            options(16, 16),
            [1.0; 3],
            vec![sphere(1.0, [0.0, 0.0, -3.0], color)],
            Vec::new(),
        );
        let image_buffer = scene.render();
        let expected = utils::to_rgb_u8(Vector3::from(color));

        let center = buffer_offset(8, 8, 16);
        assert_eq!(image_buffer[center..center + 3], expected);

        let corner = buffer_offset(0, 0, 16);
        assert_eq!(image_buffer[corner..corner + 3], [0, 0, 0]);

        let covered = image_buffer
            .chunks(3)
            .filter(|pixel| *pixel == expected)
            .count();
        let background = image_buffer
            .chunks(3)
            .filter(|pixel| *pixel == [0, 0, 0])
            .count();
        assert_gt!(covered, 0);
        assert_eq!(covered + background, 16 * 16);
    }

    #[test]
    fn it_matches_sequential_tracing() {
        let scene = scene(
            options(21, 11),
            [0.1; 3],
            vec![
                sphere(1.0, [0.5, 0.0, -4.0], [1.0, 0.2, 0.2]),
                sphere(0.5, [-1.0, 0.5, -3.0], [0.2, 1.0, 0.2]),
                floor([0.8; 3]),
            ],
            vec![light([2.0, 4.0, 0.0], 30.0)],
        );
        let image_buffer = scene.render();

        for y in 0..11 {
            for x in 0..21 {
                let offset = buffer_offset(x, y, 21);
                assert_eq!(image_buffer[offset..offset + 3], scene.screen_raycast(x, y));
            }
        }
    }

    #[test]
    fn it_selects_the_nearest_object_regardless_of_order() {
        let near = sphere(1.0, [0.0, 0.0, -3.0], [1.0, 0.0, 0.0]);
        let far = sphere(1.0, [0.0, 0.0, -4.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new(Point3::origin(), Vector3::from([0.0, 0.0, -1.0]));

        for objects in vec![vec![near.clone(), far.clone()], vec![far, near]] {
            let scene = scene(options(1, 1), [0.0; 3], objects, Vec::new());
            let intersection = scene.raycast(&ray).unwrap();

            assert_lt!((intersection.distance - 2.0).abs(), 1e-12);
            assert_eq!(intersection.object.get_color(), Vector3::from([1.0, 0.0, 0.0]));
        }
    }

    #[test]
    fn it_breaks_ties_by_insertion_order() {
        let first = sphere(1.0, [0.0, 0.0, -3.0], [1.0, 0.0, 0.0]);
        let second = sphere(1.0, [0.0, 0.0, -3.0], [0.0, 0.0, 1.0]);
        let ray = Ray::new(Point3::origin(), Vector3::from([0.0, 0.0, -1.0]));

        let scene = scene(options(1, 1), [0.0; 3], vec![first, second], Vec::new());
        let intersection = scene.raycast(&ray).unwrap();
        assert_eq!(intersection.object.get_color(), Vector3::from([1.0, 0.0, 0.0]));
    }

    #[test]
    fn it_never_hits_lights() {
        let ray = Ray::new(Point3::origin(), Vector3::from([0.0, 0.0, -1.0]));
        let scene = scene(
            options(1, 1),
            [0.0; 3],
            vec![sphere(1.0, [0.0, 0.0, -10.0], [0.0, 1.0, 0.0])],
            vec![light([0.0, 0.0, -3.0], 1.0)],
        );

        let intersection = scene.raycast(&ray).unwrap();
        assert_lt!((intersection.distance - 9.0).abs(), 1e-12);
        assert_eq!(intersection.object.get_color(), Vector3::from([0.0, 1.0, 0.0]));

        let scene = self::scene(options(1, 1), [0.0; 3], Vec::new(), vec![light([0.0; 3], 1.0)]);
        assert!(scene.raycast(&ray).is_none());
    }

    #[test]
    fn it_lights_planes_with_inverse_square_falloff() {
        let scene = scene(
            options(1, 1),
            [0.0; 3],
            vec![floor([1.0; 3])],
            vec![light([0.0, 2.0, 0.0], 8.0)],
        );

        // Directly below the light: N.L = 1, dist = 2
        let color = scene.get_color(&down_at(0.0, 0.0));
        assert_lt!((color - Vector3::repeat(2.0)).norm(), 1e-12);

        // Offset by 2: dist^2 = 8, N.L = 2 / sqrt(8)
        let color = scene.get_color(&down_at(2.0, 0.0));
        let expected = 8.0 / 8.0 * (2.0 / 8.0f64.sqrt());
        assert_lt!((color - Vector3::repeat(expected)).norm(), 1e-12);
    }

    #[test]
    fn it_ignores_coplanar_lights() {
        let scene = scene(
            options(1, 1),
            [0.25; 3],
            vec![floor([1.0; 3])],
            vec![light([3.0, 0.0, 0.0], 100.0)],
        );

        let color = scene.get_color(&down_at(0.0, 0.0));
        assert_lt!((color - Vector3::repeat(0.25)).norm(), 1e-12);
    }

    #[test]
    fn it_skips_lights_at_the_hit_point() {
        let scene = scene(
            options(1, 1),
            [0.5; 3],
            vec![floor([1.0; 3])],
            vec![light([0.0, 0.0, 0.0], 1.0)],
        );

        let color = scene.get_color(&down_at(0.0, 0.0));
        assert_eq!(color, Vector3::repeat(0.5));
    }

    #[test]
    fn it_multiplies_lighting_by_albedo() {
        let scene = scene(
            options(1, 1),
            [0.5; 3],
            vec![floor([1.0, 0.5, 0.0])],
            vec![light([0.0, 1.0, 0.0], 0.5)],
        );

        let color = scene.get_color(&down_at(0.0, 0.0));
        assert_lt!((color - Vector3::from([1.0, 0.5, 0.0])).norm(), 1e-12);
    }

    #[test]
    fn it_casts_shadows_only_when_enabled() {
        let objects = vec![floor([1.0; 3]), sphere(0.5, [0.0, 1.0, 0.0], [1.0; 3])];
        let lights = vec![light([0.0, 3.0, 0.0], 9.0)];

        let lit = scene(options(1, 1), [0.0; 3], objects.clone(), lights.clone());
        let color = lit.get_color(&down_at(0.0, 3.0));
        assert_gt!(color.x, 0.0);
        // Hit the floor beneath the sphere from below the sphere
        let under_sphere = Ray::new(
            Point3::from([0.0, 0.25, 0.0]),
            Vector3::from([0.0, -1.0, 0.0]),
        );
        assert_lt!((lit.get_color(&under_sphere) - Vector3::repeat(1.0)).norm(), 1e-12);

        let shadowed = scene(
            RenderOptions {
                shadows: true,
                ..options(1, 1)
            },
            [0.0; 3],
            objects,
            lights,
        );
        assert_eq!(shadowed.get_color(&under_sphere), Vector3::zeros());
        assert_eq!(shadowed.get_color(&down_at(0.0, 3.0)), color);
    }

    #[test]
    fn it_builds_camera_rays_through_pixel_centers() {
        let scene = scene(options(3, 3), [0.0; 3], Vec::new(), Vec::new());

        let ray = scene.build_camera_ray(1, 1);
        assert_eq!(ray.origin, Point3::origin());
        assert_lt!((ray.direction - Vector3::from([0.0, 0.0, -1.0])).norm(), 1e-12);

        // Top-left pixel looks up and to the left
        let ray = scene.build_camera_ray(0, 0);
        assert_lt!(ray.direction.x, 0.0);
        assert_gt!(ray.direction.y, 0.0);
        assert_lt!((ray.direction.norm() - 1.0).abs(), 1e-12);
    }

    #[test]
    fn it_spans_the_field_of_view() {
        let scene = scene(options(2000, 1000), [0.0; 3], Vec::new(), Vec::new());
        let half_fov = (30.0f64).to_radians().tan();

        // Right edge pixel center, middle row
        let ray = scene.build_camera_ray(1999, 500);
        let sx = ((1999.5 / 2000.0) * 2.0 - 1.0) * 2.0 * half_fov;
        let sy = (1.0 - (500.5 / 1000.0) * 2.0) * half_fov;
        let expected = Vector3::from([sx, sy, -1.0]).normalize();
        assert_lt!((ray.direction - expected).norm(), 1e-12);
    }

    #[test]
    fn it_places_rays_at_the_camera_transform() {
        let camera: RaytracingCamera = Camera {
            transform: Transform::new(
                Point3::from([1.0, 2.0, 3.0]),
                crate::core::euler_rotation(&Vector3::from([0.0, 90.0, 0.0])),
                Vector3::repeat(4.0),
            ),
            ..Camera::default()
        }
        .into();
        let scene = RaytracingScene::new(
            options(3, 3),
            camera,
            AmbientLight::default(),
            Vec::new(),
            Vec::new(),
        );

        let ray = scene.build_camera_ray(1, 1);
        assert_eq!(ray.origin, Point3::from([1.0, 2.0, 3.0]));
        assert_lt!((ray.direction - Vector3::from([-1.0, 0.0, 0.0])).norm(), 1e-12);
    }

    #[test]
    fn it_builds_images_of_the_scene_dimensions() {
        let scene = scene(
            options(9, 5),
            [1.0; 3],
            vec![sphere(1.0, [0.0, 0.0, -3.0], [1.0; 3])],
            Vec::new(),
        );
        let (image, _) = scene.raytrace_to_image(None);

        assert_eq!(image.dimensions(), (9, 5));
        assert_eq!(image.get_pixel(4, 2).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
