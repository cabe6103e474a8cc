//! Banner style action.
//!
//! Recolours a banner, changes its text colour, or toggles its no-entry
//! restriction. Addressed by banner index rather than by tile position.

use super::error::BannerError;
use super::{ActionFlags, ActionOutcome, ActionTransition, GameCommand};
use crate::config::GameConfig;
use crate::intent::Intent;
use crate::state::{Banner, BannerFlags, BannerIndex, Duplication, EdgeMask, GameState};
use crate::text;

/// Style change applied to a banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerStyle {
    /// Palette index `0..=31`.
    PrimaryColour(u8),
    /// Text colour index `0..=13`.
    TextColour(u8),
    /// Whether guests are kept out.
    NoEntry(bool),
}

impl BannerStyle {
    pub const KIND_PRIMARY_COLOUR: u8 = 0;
    pub const KIND_TEXT_COLOUR: u8 = 1;
    pub const KIND_NO_ENTRY: u8 = 2;

    /// Builds a style from its wire kind byte and parameter byte.
    pub fn from_raw(kind: u8, parameter: u8) -> Result<Self, BannerError> {
        match kind {
            Self::KIND_PRIMARY_COLOUR => Ok(Self::PrimaryColour(parameter)),
            Self::KIND_TEXT_COLOUR => Ok(Self::TextColour(parameter)),
            Self::KIND_NO_ENTRY => Ok(Self::NoEntry(parameter != 0)),
            kind => Err(BannerError::UnknownStyleKind { kind }),
        }
    }

    pub const fn kind(&self) -> u8 {
        match self {
            Self::PrimaryColour(_) => Self::KIND_PRIMARY_COLOUR,
            Self::TextColour(_) => Self::KIND_TEXT_COLOUR,
            Self::NoEntry(_) => Self::KIND_NO_ENTRY,
        }
    }

    pub const fn parameter(&self) -> u8 {
        match *self {
            Self::PrimaryColour(colour) | Self::TextColour(colour) => colour,
            Self::NoEntry(enabled) => enabled as u8,
        }
    }

    fn check_parameter(&self) -> Result<(), BannerError> {
        match *self {
            Self::PrimaryColour(colour) if colour > GameConfig::MAX_PRIMARY_COLOUR => {
                Err(BannerError::InvalidPrimaryColour { colour })
            }
            Self::TextColour(colour) if colour > GameConfig::MAX_TEXT_COLOUR => {
                Err(BannerError::InvalidTextColour { colour })
            }
            _ => Ok(()),
        }
    }
}

/// Wire representation: kind, banner index, parameter, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerSetStyleParams {
    pub kind: u8,
    pub banner_index: u8,
    pub parameter: u8,
}

/// Changes one style attribute of a banner.
///
/// # Invariants
///
/// - Fails without mutation when the banner index is null or out of range
/// - Fails without mutation when the parameter is outside the variant's range
/// - A failed text allocation leaves the previous text and text colour live
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "BannerSetStyleParams", try_from = "BannerSetStyleParams")
)]
pub struct BannerSetStyleAction {
    pub banner_index: BannerIndex,
    pub style: BannerStyle,
}

impl BannerSetStyleAction {
    pub fn new(banner_index: BannerIndex, style: BannerStyle) -> Self {
        Self {
            banner_index,
            style,
        }
    }

    /// Preconditions shared by query and execute.
    fn check(&self, state: &GameState) -> Result<ActionOutcome, BannerError> {
        let banner = self.banner(state)?;
        let position = banner
            .tile
            .to_world_centre(state.tiles.surface_height(banner.tile) & 0xFFFF);

        state
            .banner_element(self.banner_index)
            .ok_or(BannerError::ElementNotFound {
                index: self.banner_index,
            })?;

        self.style.check_parameter()?;

        Ok(ActionOutcome::landscaping(position))
    }

    fn banner<'s>(&self, state: &'s GameState) -> Result<&'s Banner, BannerError> {
        let index = self.banner_index;
        if !index.is_valid() {
            return Err(BannerError::IndexOutOfRange { index });
        }
        state
            .banners
            .get(index)
            .ok_or(BannerError::BannerNotFound { index })
    }

    fn banner_mut<'s>(&self, state: &'s mut GameState) -> Result<&'s mut Banner, BannerError> {
        let index = self.banner_index;
        state
            .banners
            .get_mut(index)
            .ok_or(BannerError::BannerNotFound { index })
    }

    fn set_text_colour(&self, state: &mut GameState, colour: u8) -> Result<(), BannerError> {
        let code = text::colour_code(colour).ok_or(BannerError::InvalidTextColour { colour })?;
        let previous = self.banner(state)?.string_id;

        let updated = text::with_leading_colour(&state.strings.format(previous), code);
        let string_id = state
            .strings
            .allocate(&updated, Duplication::Permitted)
            .map_err(BannerError::TextAllocation)?;

        let banner = self.banner_mut(state)?;
        banner.text_colour = colour;
        banner.string_id = string_id;
        state.strings.free(previous);
        Ok(())
    }

    fn set_no_entry(&self, state: &mut GameState, enabled: bool) -> Result<(), BannerError> {
        let index = self.banner_index;
        let element = state
            .banner_element_mut(index)
            .ok_or(BannerError::ElementNotFound { index })?;
        let edge = EdgeMask::from_direction(element.position);
        element.allowed_edges.set(edge, !enabled);

        self.banner_mut(state)?
            .flags
            .set(BannerFlags::NO_ENTRY, enabled);
        Ok(())
    }
}

impl ActionTransition for BannerSetStyleAction {
    type Error = BannerError;

    fn command(&self) -> GameCommand {
        GameCommand::SetBannerStyle
    }

    fn flags(&self) -> ActionFlags {
        ActionFlags::ALLOW_WHILE_PAUSED
    }

    fn pre_validate(&self, state: &GameState) -> Result<ActionOutcome, Self::Error> {
        self.check(state)
    }

    fn apply(&self, state: &mut GameState) -> Result<(), Self::Error> {
        match self.style {
            BannerStyle::PrimaryColour(colour) => {
                self.banner_mut(state)?.colour = colour;
                Ok(())
            }
            BannerStyle::TextColour(colour) => self.set_text_colour(state, colour),
            BannerStyle::NoEntry(enabled) => self.set_no_entry(state, enabled),
        }
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let banner = self.banner(state)?;
        match self.style {
            BannerStyle::PrimaryColour(colour) => {
                debug_assert_eq!(banner.colour, colour, "banner colour should be updated");
            }
            BannerStyle::TextColour(colour) => {
                debug_assert_eq!(
                    text::leading_colour(&state.strings.format(banner.string_id)),
                    Some(colour),
                    "banner text should start with its text colour code"
                );
            }
            BannerStyle::NoEntry(enabled) => {
                if let Some(element) = state.banner_element(self.banner_index) {
                    let edge = EdgeMask::from_direction(element.position);
                    debug_assert_eq!(
                        element.allowed_edges.contains(edge),
                        !enabled,
                        "facing edge should be closed exactly when no-entry is set"
                    );
                }
            }
        }
        Ok(())
    }

    fn intent(&self) -> Option<Intent> {
        Some(Intent::update_banner(self.banner_index))
    }
}

impl From<BannerSetStyleAction> for BannerSetStyleParams {
    fn from(action: BannerSetStyleAction) -> Self {
        Self {
            kind: action.style.kind(),
            banner_index: action.banner_index.0,
            parameter: action.style.parameter(),
        }
    }
}

impl TryFrom<BannerSetStyleParams> for BannerSetStyleAction {
    type Error = BannerError;

    fn try_from(params: BannerSetStyleParams) -> Result<Self, Self::Error> {
        let style = BannerStyle::from_raw(params.kind, params.parameter)?;
        Ok(Self::new(BannerIndex(params.banner_index), style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionErrorKind, MessageKey};
    use crate::state::{Direction, StringId, TileCoords};

    fn park_with_banner(text: &str) -> (GameState, BannerIndex) {
        let mut state = GameState::default();
        let tile = TileCoords::new(3, 5);
        state.add_surface(tile, 4).unwrap();
        let string_id = state.strings.allocate(text, Duplication::Permitted).unwrap();
        let index = state
            .place_banner(Banner::new(tile).with_text(string_id), Direction::NORTH, 4)
            .unwrap();
        (state, index)
    }

    fn run(action: &BannerSetStyleAction, state: &mut GameState) -> Result<(), BannerError> {
        action.pre_validate(state)?;
        action.apply(state)?;
        action.post_validate(state)
    }

    #[test]
    fn test_outcome_position_is_tile_centre() {
        let (state, index) = park_with_banner("Exit");
        let action = BannerSetStyleAction::new(index, BannerStyle::PrimaryColour(2));

        let outcome = action.pre_validate(&state).unwrap();
        assert_eq!(outcome.position.x, 3 * 32 + 16);
        assert_eq!(outcome.position.y, 5 * 32 + 16);
        assert_eq!(outcome.position.z, 4 * GameConfig::COORDS_Z_STEP);
    }

    #[test]
    fn test_primary_colour_range() {
        let (mut state, index) = park_with_banner("Exit");

        for colour in 0..=31 {
            let action = BannerSetStyleAction::new(index, BannerStyle::PrimaryColour(colour));
            run(&action, &mut state).unwrap();
            assert_eq!(state.banners.get(index).unwrap().colour, colour);
        }

        let before = state.clone();
        for colour in [32, 100, 255] {
            let action = BannerSetStyleAction::new(index, BannerStyle::PrimaryColour(colour));
            assert_eq!(
                action.pre_validate(&state),
                Err(BannerError::InvalidPrimaryColour { colour })
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_text_colour_range() {
        let (state, index) = park_with_banner("Exit");

        for colour in 0..=13 {
            let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(colour));
            assert!(action.pre_validate(&state).is_ok());
        }

        let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(14));
        let err = action.pre_validate(&state).unwrap_err();
        assert_eq!(err.kind(), ActionErrorKind::InvalidParameter);
    }

    #[test]
    fn test_invalid_targets() {
        let (state, _) = park_with_banner("Exit");

        for raw in [250u8, 251, 254, BannerIndex::NULL.0] {
            let action =
                BannerSetStyleAction::new(BannerIndex(raw), BannerStyle::PrimaryColour(1));
            let err = action.pre_validate(&state).unwrap_err();
            assert_eq!(err, BannerError::IndexOutOfRange { index: BannerIndex(raw) });
        }

        let unused = BannerSetStyleAction::new(BannerIndex(7), BannerStyle::NoEntry(true));
        assert_eq!(
            unused.pre_validate(&state).unwrap_err().message_key(),
            MessageKey::InvalidSelectionOfObjects
        );
    }

    #[test]
    fn test_missing_element_is_invalid_target() {
        let (mut state, index) = park_with_banner("Exit");
        let tile = state.banners.get(index).unwrap().tile;
        state.tiles.retain(tile, |element| element.as_banner().is_none());

        let action = BannerSetStyleAction::new(index, BannerStyle::PrimaryColour(1));
        let err = action.pre_validate(&state).unwrap_err();
        assert_eq!(err, BannerError::ElementNotFound { index });
        assert_eq!(err.message_key(), MessageKey::None);
    }

    #[test]
    fn test_text_colour_replaces_existing_code() {
        let red = text::colour_code(3).unwrap();
        let (mut state, index) = park_with_banner(&format!("{red}Exit"));
        let old_id = state.banners.get(index).unwrap().string_id;

        let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(9));
        run(&action, &mut state).unwrap();

        let banner = state.banners.get(index).unwrap();
        let new_text = state.strings.format(banner.string_id);
        assert_eq!(banner.text_colour, 9);
        assert_eq!(new_text, format!("{}Exit", text::colour_code(9).unwrap()));
        assert_eq!(new_text.len(), format!("{red}Exit").len());
        assert_eq!(state.strings.get(old_id), None);
    }

    #[test]
    fn test_text_colour_inserts_missing_code() {
        let (mut state, index) = park_with_banner("Exit");

        let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(0));
        run(&action, &mut state).unwrap();

        let banner = state.banners.get(index).unwrap();
        let new_text = state.strings.format(banner.string_id);
        assert_eq!(new_text, format!("{}Exit", text::FORMAT_COLOUR_CODE_START));
        assert_eq!(
            new_text.len(),
            "Exit".len() + text::FORMAT_COLOUR_CODE_START.len_utf8()
        );
        assert_eq!(state.strings.len(), 1);
    }

    #[test]
    fn test_text_colour_keeps_full_length_text() {
        for len in [GameConfig::USER_STRING_MAX_LENGTH - 1, GameConfig::USER_STRING_MAX_LENGTH] {
            let body = "A".repeat(len);
            let (mut state, index) = park_with_banner(&body);

            let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(2));
            run(&action, &mut state).unwrap();
            let code = text::colour_code(2).unwrap();
            let inserted = state.strings.format(state.banners.get(index).unwrap().string_id);
            assert_eq!(inserted, format!("{code}{body}"));
            assert_eq!(inserted.len(), len + code.len_utf8());

            let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(12));
            run(&action, &mut state).unwrap();
            let code = text::colour_code(12).unwrap();
            let replaced = state.strings.format(state.banners.get(index).unwrap().string_id);
            assert_eq!(replaced, format!("{code}{body}"));
            assert_eq!(replaced.len(), inserted.len());
        }
    }

    #[test]
    fn test_text_allocation_failure_keeps_previous_text() {
        let mut state = GameState::default();
        state.strings = crate::state::UserStringPool::with_capacity(1);
        let tile = TileCoords::new(0, 0);
        let string_id = state.strings.allocate("Exit", Duplication::Permitted).unwrap();
        let index = state
            .place_banner(Banner::new(tile).with_text(string_id), Direction::WEST, 0)
            .unwrap();
        let before = state.clone();

        let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(5));
        action.pre_validate(&state).unwrap();
        let err = action.apply(&mut state).unwrap_err();

        assert_eq!(err.kind(), ActionErrorKind::ResourceExhausted);
        assert_eq!(err.message_key(), MessageKey::CantSetBannerText);
        assert_eq!(state, before);
        assert_eq!(state.strings.get(string_id), Some("Exit"));
    }

    #[test]
    fn test_text_colour_on_banner_without_text() {
        let mut state = GameState::default();
        let index = state
            .place_banner(Banner::new(TileCoords::new(2, 2)), Direction::SOUTH, 0)
            .unwrap();
        assert_eq!(state.banners.get(index).unwrap().string_id, StringId::NONE);

        let action = BannerSetStyleAction::new(index, BannerStyle::TextColour(4));
        run(&action, &mut state).unwrap();

        let banner = state.banners.get(index).unwrap();
        assert_eq!(
            state.strings.format(banner.string_id),
            text::colour_code(4).unwrap().to_string()
        );
    }

    #[test]
    fn test_no_entry_clears_only_facing_edge() {
        let (mut state, index) = park_with_banner("Exit");
        let element = *state.banner_element(index).unwrap();
        let facing = EdgeMask::from_direction(element.position);

        let on = BannerSetStyleAction::new(index, BannerStyle::NoEntry(true));
        run(&on, &mut state).unwrap();

        let edges = state.banner_element(index).unwrap().allowed_edges;
        assert_eq!(edges, EdgeMask::all() - facing);
        assert!(state.banners.get(index).unwrap().has_no_entry());

        let off = BannerSetStyleAction::new(index, BannerStyle::NoEntry(false));
        run(&off, &mut state).unwrap();

        let edges = state.banner_element(index).unwrap().allowed_edges;
        assert_eq!(edges, element.allowed_edges);
        assert!(!state.banners.get(index).unwrap().has_no_entry());
    }

    #[test]
    fn test_no_entry_keeps_other_flags_and_edges() {
        let (mut state, index) = park_with_banner("Exit");
        state.banners.get_mut(index).unwrap().flags = BannerFlags::LINKED_TO_RIDE;
        state.banner_element_mut(index).unwrap().allowed_edges = EdgeMask::NORTH | EdgeMask::EAST;

        run(
            &BannerSetStyleAction::new(index, BannerStyle::NoEntry(true)),
            &mut state,
        )
        .unwrap();
        assert_eq!(
            state.banners.get(index).unwrap().flags,
            BannerFlags::LINKED_TO_RIDE | BannerFlags::NO_ENTRY
        );
        assert_eq!(
            state.banner_element(index).unwrap().allowed_edges,
            EdgeMask::EAST
        );

        run(
            &BannerSetStyleAction::new(index, BannerStyle::NoEntry(false)),
            &mut state,
        )
        .unwrap();
        assert_eq!(
            state.banners.get(index).unwrap().flags,
            BannerFlags::LINKED_TO_RIDE
        );
        assert_eq!(
            state.banner_element(index).unwrap().allowed_edges,
            EdgeMask::NORTH | EdgeMask::EAST
        );
    }

    #[test]
    fn test_raw_params() {
        assert_eq!(BannerStyle::from_raw(2, 9), Ok(BannerStyle::NoEntry(true)));
        assert_eq!(
            BannerStyle::from_raw(3, 0),
            Err(BannerError::UnknownStyleKind { kind: 3 })
        );

        let action = BannerSetStyleAction::new(BannerIndex(12), BannerStyle::TextColour(6));
        let params = BannerSetStyleParams::from(action);
        assert_eq!(
            params,
            BannerSetStyleParams {
                kind: 1,
                banner_index: 12,
                parameter: 6
            }
        );
        assert_eq!(BannerSetStyleAction::try_from(params), Ok(action));
    }
}
