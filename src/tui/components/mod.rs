//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing the route and status
//! - `Card`: One post or comment
//! - `LoadingIndicator`, `ErrorMessage`, `EmptyState`: screen placeholders
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that pair persistent state with a per-frame render wrapper:
//! - `PostList` / `PostListState`: the list screen, selection and refresh
//! - `PostDetails` / `PostDetailsState`: the detail screen
//! - `CardList` / `CardListState`: scrolling stack of cards used by both
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props", never by reaching into `App`.
//! Screens are handed the view projection of their query, not the store:
//!
//! ```rust,ignore
//! // Good: the component sees exactly what it renders
//! PostList::new(&mut tui.post_list, posts_screen.view(), spinner_frame).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! PostList::new(&mut tui.post_list, &app).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── status.rs        (Loading / error / empty placeholders)
//! ├── card.rs          (Single post or comment)
//! ├── card_list.rs     (Scrollable card container)
//! ├── post_list.rs     (List screen)
//! └── post_details.rs  (Detail screen)
//! ```

pub mod card;
pub mod card_list;
pub mod post_details;
pub mod post_list;
pub mod status;
mod title_bar;

pub use post_details::{PostDetails, PostDetailsState};
pub use post_list::{PostList, PostListEvent, PostListState};
pub use title_bar::TitleBar;
