pub mod streaming_linereader;
