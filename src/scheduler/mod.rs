pub mod draft_sweep;
