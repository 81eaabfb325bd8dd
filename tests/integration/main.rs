//! Integration tests

mod admin_api_live;
mod lane_editor_flow;
