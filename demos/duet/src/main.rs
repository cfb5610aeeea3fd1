//! A scripted two-player match, start to finish.
//!
//! Drives one full three-round session through the async session API:
//! drawings, a rejected submission, wrong guesses, solves, and the
//! final persisted record. Run with `cargo run -p duet`; set
//! `RUST_LOG=glyphline_engine=debug` for engine traces.

use glyphline::{
    CatalogError, Drawing, DrawingOutcome, DrawingRejection, GuessOutcome,
    PlayerId, SessionHandle, SessionManager, SymbolSet, Term, TermCatalog,
};
use tracing_subscriber::EnvFilter;

const ARTIST_A: PlayerId = PlayerId(1);
const ARTIST_B: PlayerId = PlayerId(2);

// ---------------------------------------------------------------------------
// The script
// ---------------------------------------------------------------------------

/// One scripted turn: the hidden term, the drawing the artist submits,
/// and the guesses the guesser tries in order (last one is right).
struct Scene {
    term: &'static str,
    complexity: u8,
    drawing: &'static str,
    guesses: &'static [&'static str],
}

const SCENES: [Scene; 6] = [
    Scene {
        term: "sun",
        complexity: 1,
        drawing: "  \\ | /\n -- * --\n  / | \\",
        guesses: &["star", "sun"],
    },
    Scene {
        term: "house",
        complexity: 1,
        drawing: "   /\\\n  /  \\\n |----|\n |  []|\n +----+",
        guesses: &["house"],
    },
    Scene {
        term: "sailboat",
        complexity: 3,
        drawing: "    |\\\n    | \\\n    |--\\\n \\--+--/\n ~~~~~~~~",
        guesses: &["flag", "ship", "sailboat"],
    },
    Scene {
        term: "bridge",
        complexity: 3,
        drawing: " /------\\\n |  ||  |\n=+==++==+=",
        guesses: &["gate", "bridge"],
    },
    Scene {
        term: "rocket",
        complexity: 4,
        drawing: "   /\\\n  |==|\n  |**|\n /|--|\\\n  ****",
        guesses: &["tower", "rocket"],
    },
    Scene {
        term: "helicopter",
        complexity: 4,
        drawing: " --==+==--\n    (--)\n  <[____]>\n     ||",
        guesses: &["drone", "helicopter"],
    },
];

/// Serves the scripted terms in order. Each turn's alphabet is exactly
/// the glyphs its scripted drawing needs.
struct ScriptedCatalog {
    cursor: usize,
}

impl TermCatalog for ScriptedCatalog {
    fn next(
        &mut self,
        _round_index: u32,
        _turn_index: u32,
    ) -> Result<(Term, SymbolSet), CatalogError> {
        let scene = SCENES.get(self.cursor).ok_or(CatalogError::Exhausted)?;
        self.cursor += 1;

        let term = Term::new(scene.term, scene.complexity)
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        let symbols =
            SymbolSet::new(scene.drawing.chars().filter(|c| !c.is_whitespace()))
                .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        Ok((term, symbols))
    }
}

// ---------------------------------------------------------------------------
// Driving the match
// ---------------------------------------------------------------------------

async fn play_scene(
    handle: &SessionHandle,
    scene: &Scene,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = handle.state().await?;
    let artist = snapshot.artist.ok_or("no live turn")?;
    let guesser = snapshot.guesser.ok_or("no live turn")?;
    println!(
        "\n== round {} | {artist} draws, {guesser} guesses ==",
        snapshot.round_index
    );

    match handle.submit_drawing(artist, Drawing::from(scene.drawing)).await? {
        DrawingOutcome::Accepted => println!("{}", scene.drawing),
        DrawingOutcome::Rejected(rejection) => {
            return Err(format!("scripted drawing rejected: {rejection}").into())
        }
    }

    for guess in scene.guesses {
        match handle.submit_guess(guesser, *guess).await? {
            GuessOutcome::Correct { attempts_used } => {
                println!("  {guesser}: \"{guess}\" -- solved in {attempts_used}")
            }
            GuessOutcome::Incorrect { attempts_remaining } => {
                println!("  {guesser}: \"{guess}\" -- no ({attempts_remaining} left)")
            }
            GuessOutcome::Exhausted => {
                println!("  {guesser}: \"{guess}\" -- out of attempts")
            }
        }
    }

    let after = handle.state().await?;
    println!("  shared score: {}", after.shared_score);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut manager = SessionManager::new();
    let handle = manager.create_session_with_catalog(
        ARTIST_A,
        ARTIST_B,
        Box::new(ScriptedCatalog { cursor: 0 }),
    )?;
    println!("session {} started", handle.session_id());

    // A submission with letters in it is refused with every offending
    // position; the turn is untouched and the artist redraws.
    let outcome = handle
        .submit_drawing(ARTIST_A, Drawing::from("s-u-n"))
        .await?;
    if let DrawingOutcome::Rejected(DrawingRejection::DisallowedGlyphs(violations)) =
        outcome
    {
        println!("warm-up drawing refused:");
        for v in &violations {
            println!("  position {}: {:?} ({})", v.position, v.glyph, v.fault);
        }
    }

    for scene in &SCENES {
        play_scene(&handle, scene).await?;
    }

    let final_state = handle.state().await?;
    println!(
        "\nmatch {}: final shared score {}",
        final_state.status, final_state.shared_score
    );

    let record = handle.record().await?;
    println!("\npersisted record:\n{}", serde_json::to_string_pretty(&record)?);

    manager.destroy_session(handle.session_id()).await?;
    Ok(())
}
