mod test_acquire_screen;
mod test_substitute_active_source;
