use eframe::egui::{Pos2, Rect, Vec2, vec2};

pub const ZOOM_STEP: f32 = 1.1;
pub const MIN_ZOOM: f32 = 0.02;
pub const MAX_ZOOM: f32 = 40.0;
pub const VIEWER_SIZE: Vec2 = vec2(960.0, 780.0);
pub const SATELLITE_SIZE: Vec2 = vec2(140.0, 140.0);
pub const EXPAND_MARGIN: f32 = 24.0;
pub const VERTEX_RADIUS: f32 = 8.0;
pub const EDGE_PICK_TOLERANCE: f32 = 4.0;

/// Layout-to-screen mapping: `screen = rect.min + offset + world * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn world_to_screen(&self, rect: Rect, world: Pos2) -> Pos2 {
        rect.min + self.offset + world.to_vec2() * self.scale
    }

    pub fn screen_to_world(&self, rect: Rect, screen: Pos2) -> Pos2 {
        ((screen - rect.min - self.offset) / self.scale).to_pos2()
    }

    /// Scales by `factor` keeping the world point under `anchor` in place.
    pub fn zoom_about(&mut self, rect: Rect, anchor: Pos2, factor: f32) {
        let world = self.screen_to_world(rect, anchor);
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = anchor - rect.min - world.to_vec2() * self.scale;
    }

    pub fn zoom_in(&mut self, rect: Rect) {
        self.zoom_about(rect, rect.center(), ZOOM_STEP);
    }

    pub fn zoom_out(&mut self, rect: Rect) {
        self.zoom_about(rect, rect.center(), 1.0 / ZOOM_STEP);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn fit(layout_size: Vec2, rect: Rect) -> Self {
        let size = layout_size.max(Vec2::splat(1.0));
        let scale = (rect.width() / size.x).min(rect.height() / size.y);
        let offset = (rect.size() - size * scale) / 2.0;
        Self { scale, offset }
    }

    pub fn visible_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_min_max(
            self.screen_to_world(rect, rect.min),
            self.screen_to_world(rect, rect.max),
        )
    }

    pub fn center_on(&mut self, rect: Rect, world: Pos2) {
        self.offset = rect.size() / 2.0 - world.to_vec2() * self.scale;
    }
}

/// Size the layout must grow to after a drag, if any vertex left the viewport.
///
/// The running maximum starts at the viewport size. When either dimension
/// overflows, both get the margin added.
pub fn expanded_size(viewport: Vec2, positions: &[Pos2]) -> Option<Vec2> {
    let max = positions
        .iter()
        .fold(viewport, |max, position| max.max(position.to_vec2()));

    (max.x > viewport.x || max.y > viewport.y).then(|| max + Vec2::splat(EXPAND_MARGIN))
}

/// Closest item whose screen position is within `radius` of `pointer`.
pub fn hit_vertex<T>(
    items: impl IntoIterator<Item = (T, Pos2)>,
    pointer: Pos2,
    radius: f32,
) -> Option<T> {
    items
        .into_iter()
        .map(|(item, position)| (item, position.distance_sq(pointer)))
        .filter(|(_, distance)| *distance <= radius * radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(item, _)| item)
}

/// Closest segment within `tolerance` of `pointer`.
pub fn hit_edge<T>(
    segments: impl IntoIterator<Item = (T, Pos2, Pos2)>,
    pointer: Pos2,
    tolerance: f32,
) -> Option<T> {
    segments
        .into_iter()
        .map(|(item, from, to)| (item, segment_distance(pointer, from, to)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(item, _)| item)
}

pub fn segment_distance(point: Pos2, from: Pos2, to: Pos2) -> f32 {
    let segment = to - from;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return point.distance(from);
    }

    let t = ((point - from).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(from + segment * t)
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(100.0, 50.0), VIEWER_SIZE)
    }

    fn close(a: Pos2, b: Pos2) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn screen_and_world_coordinates_invert() {
        let transform = ViewTransform {
            scale: 2.5,
            offset: vec2(-30.0, 12.0),
        };
        let world = pos2(44.0, 81.0);
        let screen = transform.world_to_screen(viewport(), world);
        assert!(close(transform.screen_to_world(viewport(), screen), world));
    }

    #[test]
    fn zoom_buttons_keep_the_centre_fixed() {
        let rect = viewport();
        let mut transform = ViewTransform::default();
        let centre_world = transform.screen_to_world(rect, rect.center());

        transform.zoom_in(rect);
        assert!((transform.scale - ZOOM_STEP).abs() < 1e-6);
        assert!(close(transform.screen_to_world(rect, rect.center()), centre_world));

        transform.zoom_out(rect);
        assert!((transform.scale - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wheel_zoom_keeps_the_pointer_fixed() {
        let rect = viewport();
        let mut transform = ViewTransform::default();
        let pointer = pos2(300.0, 400.0);
        let under = transform.screen_to_world(rect, pointer);

        transform.zoom_about(rect, pointer, 3.0);
        assert!(close(transform.world_to_screen(rect, under), pointer));
    }

    #[test]
    fn fit_shows_the_whole_layout() {
        let target = Rect::from_min_size(pos2(10.0, 10.0), SATELLITE_SIZE);
        let transform = ViewTransform::fit(vec2(1400.0, 700.0), target);
        assert!((transform.scale - 0.1).abs() < 1e-6);

        let top_left = transform.world_to_screen(target, Pos2::ZERO);
        let bottom_right = transform.world_to_screen(target, pos2(1400.0, 700.0));
        assert!(target.expand(1e-3).contains(top_left));
        assert!(target.expand(1e-3).contains(bottom_right));
        assert!((top_left.y - 45.0).abs() < 1e-3);
    }

    #[test]
    fn centering_and_visible_rect() {
        let rect = viewport();
        let mut transform = ViewTransform {
            scale: 2.0,
            offset: Vec2::ZERO,
        };
        transform.center_on(rect, pos2(500.0, 500.0));

        let visible = transform.visible_world_rect(rect);
        assert!(close(visible.center(), pos2(500.0, 500.0)));
        assert!((visible.width() - 480.0).abs() < 1e-3);
    }

    #[test]
    fn expansion_only_after_overflow() {
        let inside = [pos2(30.0, 20.0), pos2(900.0, 700.0)];
        assert_eq!(expanded_size(VIEWER_SIZE, &inside), None);

        let outside = [pos2(30.0, 20.0), pos2(1000.0, 100.0)];
        assert_eq!(
            expanded_size(VIEWER_SIZE, &outside),
            Some(vec2(1024.0, 804.0))
        );
    }

    #[test]
    fn hit_testing_prefers_the_closest() {
        let vertices = [(1, pos2(10.0, 10.0)), (2, pos2(14.0, 10.0))];
        assert_eq!(hit_vertex(vertices, pos2(13.0, 10.0), 8.0), Some(2));
        assert_eq!(hit_vertex(vertices, pos2(40.0, 40.0), 8.0), None);

        let edges = [(7, pos2(0.0, 0.0), pos2(100.0, 0.0))];
        assert_eq!(hit_edge(edges, pos2(50.0, 3.0), 4.0), Some(7));
        assert_eq!(hit_edge(edges, pos2(120.0, 0.0), 4.0), None);
        assert!((segment_distance(pos2(5.0, 5.0), pos2(5.0, 0.0), pos2(5.0, 0.0)) - 5.0).abs() < 1e-6);
    }
}
