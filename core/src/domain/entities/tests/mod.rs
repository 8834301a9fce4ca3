mod student_tests;
