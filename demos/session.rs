use std::ops::ControlFlow;
use stepwise_astar::{Input, MouseButton, Session, SessionConfig};

// Replays a scripted sequence of input events against a session the way a window's event loop
// would: clicks in pixel coordinates, then the search key, with a quit request arriving halfway
// through the second run.
fn main() -> stepwise_astar::Result<()> {
    let config = SessionConfig {
        rows: 10,
        pixel_width: 200,
    };
    let mut session = Session::new(config)?;
    let left = |x, y| Input::Click {
        button: MouseButton::Left,
        x,
        y,
    };
    let mut events = vec![left(10, 10), left(190, 190)];
    // A wall across the middle with a gap at the bottom.
    events.extend((0..9).map(|col| left(110, col * 20 + 10)));
    events.push(Input::RunSearch);
    events.push(Input::Click {
        button: MouseButton::Right,
        x: 110,
        y: 10,
    });
    events.push(Input::RunSearch);

    let mut quit_pending = false;
    for event in events {
        let mut frames = 0;
        let result = session.handle(event, |grid| {
            frames += 1;
            if quit_pending && frames == 10 {
                println!("Quit during search:\n{grid}");
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        });
        match result {
            Ok(Some(report)) => {
                println!(
                    "Search finished after {frames} frames, path: {:?}",
                    report.path().map(|p| p.len())
                );
                println!("{}", session.grid());
                quit_pending = true;
            }
            Ok(None) => {}
            Err(e) => {
                println!("{e}");
                session.handle(Input::Quit, |_| ControlFlow::Continue(()))?;
            }
        }
        if session.should_quit() {
            break;
        }
    }
    Ok(())
}
