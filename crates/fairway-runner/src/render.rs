use glam::Vec2;

use fairway_putt::GreenState;
use fairway_putt::config::GreenTheme;

pub type Rgb = [f32; 3];

/// One primitive for the presentation layer to draw, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect { origin: Vec2, size: Vec2, color: Rgb },
    FillCircle { center: Vec2, radius: f32, color: Rgb },
    Line { from: Vec2, to: Vec2, color: Rgb },
}

/// Drawing surface the frame is painted onto (HTML canvas, terminal, test double).
pub trait Canvas {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgb);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgb);
}

/// Build the draw list for one frame: green, hole, ball, and the aiming line
/// while a drag is in progress. Later commands paint over earlier ones.
pub fn draw_green(state: &GreenState, theme: &GreenTheme) -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::FillRect {
            origin: Vec2::ZERO,
            size: Vec2::new(state.bounds.width, state.bounds.height),
            color: theme.background,
        },
        DrawCommand::FillCircle {
            center: state.hole.position,
            radius: state.hole.radius,
            color: theme.hole,
        },
        DrawCommand::FillCircle {
            center: state.ball.position,
            radius: state.ball.radius,
            color: state.ball.color,
        },
    ];

    if let Some(aim) = state.drag.aim() {
        commands.push(DrawCommand::Line {
            from: state.ball.position,
            to: aim,
            color: theme.aim_line,
        });
    }

    commands
}

/// Replay a draw list onto a canvas.
pub fn paint<C: Canvas + ?Sized>(canvas: &mut C, commands: &[DrawCommand]) {
    for command in commands {
        match *command {
            DrawCommand::FillRect {
                origin,
                size,
                color,
            } => canvas.fill_rect(origin, size, color),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => canvas.fill_circle(center, radius, color),
            DrawCommand::Line { from, to, color } => canvas.stroke_line(from, to, color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_putt::test_helpers::scenario_green;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl Canvas for Recorder {
        fn fill_rect(&mut self, _: Vec2, _: Vec2, _: Rgb) {
            self.calls.push("rect");
        }
        fn fill_circle(&mut self, _: Vec2, _: f32, _: Rgb) {
            self.calls.push("circle");
        }
        fn stroke_line(&mut self, _: Vec2, _: Vec2, _: Rgb) {
            self.calls.push("line");
        }
    }

    #[test]
    fn idle_frame_draws_green_hole_ball() {
        let green = scenario_green();
        let theme = GreenTheme::default();
        let commands = draw_green(green.state(), &theme);

        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            DrawCommand::FillRect {
                origin: Vec2::ZERO,
                size: Vec2::new(600.0, 300.0),
                color: theme.background,
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::FillCircle {
                center: Vec2::new(500.0, 150.0),
                radius: 15.0,
                color: theme.hole,
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::FillCircle {
                center: Vec2::new(100.0, 150.0),
                radius: 10.0,
                color: theme.ball,
            }
        );
    }

    #[test]
    fn aim_line_only_while_dragging() {
        let mut green = scenario_green();
        let theme = GreenTheme::default();
        green.begin_drag(Vec2::new(100.0, 150.0));
        green.update_drag(Vec2::new(60.0, 170.0));

        let commands = draw_green(green.state(), &theme);
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Line {
                from: Vec2::new(100.0, 150.0),
                to: Vec2::new(60.0, 170.0),
                color: theme.aim_line,
            })
        );

        green.end_drag(Vec2::new(60.0, 170.0));
        let commands = draw_green(green.state(), &theme);
        assert!(
            !commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Line { .. }))
        );
    }

    #[test]
    fn paint_replays_in_order() {
        let mut green = scenario_green();
        green.begin_drag(Vec2::new(100.0, 150.0));
        let commands = draw_green(green.state(), &GreenTheme::default());

        let mut recorder = Recorder::default();
        paint(&mut recorder, &commands);

        assert_eq!(recorder.calls, vec!["rect", "circle", "circle", "line"]);
    }
}
