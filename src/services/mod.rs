pub mod officials_api;
