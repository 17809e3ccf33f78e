//! Integration tests for the podlaunch CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! Nothing here reaches RunPod: API calls are pointed at a closed local port.
